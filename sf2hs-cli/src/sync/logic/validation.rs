//! Configuration and connectivity checks behind the `validate` command
//!
//! Validation never raises and never mutates remote state: every problem,
//! including a failed connection, becomes a check in the report.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::api::schema::{SourceSchema, TargetSchema};
use crate::config::{Config, ObjectMapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
    Skipped,
}

impl CheckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl ValidationCheck {
    fn new(name: impl Into<String>, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    fn push(&mut self, name: impl Into<String>, status: CheckStatus, detail: impl Into<String>) {
        self.checks.push(ValidationCheck::new(name, status, detail));
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.count(CheckStatus::Fail) > 0
    }

    pub fn find(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// A collaborator that may or may not be reachable
pub enum Connection<'a, T: ?Sized> {
    Available(&'a T),
    /// Connecting failed (e.g. login rejected)
    Unavailable(String),
    /// No credentials configured
    NotConfigured,
}

/// Check configuration structure, then query each available collaborator
///
/// `only` narrows the remote checks to one configured object; naming an
/// object the configuration does not have is itself a failed check.
pub async fn validate(
    config: &Config,
    only: Option<&str>,
    source: Connection<'_, dyn SourceSchema>,
    target: Connection<'_, dyn TargetSchema>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_structure(config, &mut report);

    let objects: Vec<&ObjectMapping> = config
        .objects
        .iter()
        .filter(|o| only.is_none_or(|name| o.name == name))
        .collect();
    if let Some(name) = only {
        if objects.is_empty() {
            report.push(
                format!("objects.{}", name),
                CheckStatus::Fail,
                format!("object {} is not configured", name),
            );
        }
    }

    check_source(&objects, source, &mut report).await;
    check_target(&objects, target, &mut report).await;

    report
}

/// One failed check per configuration issue, at the issue's location;
/// locations without issues pass
fn check_structure(config: &Config, report: &mut ValidationReport) {
    let issues = config.issues();
    let clean = |location: &str| !issues.iter().any(|i| i.location == location);

    for issue in &issues {
        report.push(issue.location.clone(), CheckStatus::Fail, issue.message.clone());
    }

    if clean("objects") {
        report.push(
            "objects",
            CheckStatus::Pass,
            format!("{} object(s) configured", config.objects.len()),
        );
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for object in &config.objects {
        if !seen.insert(object.name.as_str()) {
            continue;
        }

        let fields = format!("objects.{}.fields", object.name);
        if clean(&fields) {
            report.push(
                fields,
                CheckStatus::Pass,
                format!("{} field(s) configured, target names unique", object.fields.len()),
            );
        }

        let hubspot_object = format!("objects.{}.hubspot_object", object.name);
        if clean(&hubspot_object) {
            report.push(hubspot_object, CheckStatus::Pass, object.hubspot_object.clone());
        }
    }

    let settings = &config.sync_settings;
    if clean("sync_settings.batch_size") {
        report.push("sync_settings.batch_size", CheckStatus::Pass, settings.batch_size.to_string());
    }
    if clean("sync_settings.max_retries") {
        report.push(
            "sync_settings.max_retries",
            CheckStatus::Pass,
            format!("{} attempt(s), {}s apart", settings.max_retries, settings.retry_delay),
        );
    }
}

async fn check_source(
    objects: &[&ObjectMapping],
    source: Connection<'_, dyn SourceSchema>,
    report: &mut ValidationReport,
) {
    let source = match source {
        Connection::Available(source) => {
            report.push("salesforce.connection", CheckStatus::Pass, "connected");
            source
        }
        Connection::Unavailable(reason) => {
            report.push("salesforce.connection", CheckStatus::Fail, reason);
            return;
        }
        Connection::NotConfigured => {
            report.push("salesforce.connection", CheckStatus::Skipped, "no Salesforce credentials");
            return;
        }
    };

    for object in objects {
        let fields = match source.describe_object(&object.name).await {
            Ok(fields) => {
                report.push(
                    format!("salesforce.describe.{}", object.name),
                    CheckStatus::Pass,
                    format!("{} field(s)", fields.len()),
                );
                fields
            }
            Err(err) => {
                report.push(
                    format!("salesforce.describe.{}", object.name),
                    CheckStatus::Fail,
                    err.to_string(),
                );
                continue;
            }
        };

        let missing: Vec<&str> = object
            .fields
            .iter()
            .filter(|m| !fields.iter().any(|f| f.name == m.name))
            .map(|m| m.name.as_str())
            .collect();
        if missing.is_empty() {
            report.push(
                format!("salesforce.fields.{}", object.name),
                CheckStatus::Pass,
                "all configured fields exist",
            );
        } else {
            report.push(
                format!("salesforce.fields.{}", object.name),
                CheckStatus::Fail,
                format!("missing: {}", missing.join(", ")),
            );
        }

        let blocked: Vec<String> = object
            .fields
            .iter()
            .filter_map(|m| fields.iter().find(|f| f.name == m.name))
            .filter_map(|f| f.migration.block_reason().map(|r| format!("{} ({})", f.name, r)))
            .collect();
        if blocked.is_empty() {
            report.push(
                format!("salesforce.migratable.{}", object.name),
                CheckStatus::Pass,
                "all configured fields are migratable",
            );
        } else {
            report.push(
                format!("salesforce.migratable.{}", object.name),
                CheckStatus::Warn,
                format!("not migratable: {}", blocked.join(", ")),
            );
        }
    }
}

async fn check_target(
    objects: &[&ObjectMapping],
    target: Connection<'_, dyn TargetSchema>,
    report: &mut ValidationReport,
) {
    let target = match target {
        Connection::Available(target) => target,
        Connection::Unavailable(reason) => {
            report.push("hubspot.connection", CheckStatus::Fail, reason);
            return;
        }
        Connection::NotConfigured => {
            report.push("hubspot.connection", CheckStatus::Skipped, "no HubSpot access token");
            return;
        }
    };

    let object_types: BTreeSet<&str> = objects
        .iter()
        .map(|o| o.hubspot_object.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect();

    for object_type in object_types {
        match target.list_properties(object_type).await {
            Ok(properties) => report.push(
                format!("hubspot.properties.{}", object_type),
                CheckStatus::Pass,
                format!("{} propert(ies)", properties.len()),
            ),
            Err(err) => report.push(
                format!("hubspot.properties.{}", object_type),
                CheckStatus::Fail,
                err.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::metadata::{BlockReason, HubSpotType, Migratability, SalesforceType};
    use crate::config::{FieldMapping, ObjectMapping};
    use crate::sync::logic::test_support::{FakeSource, FakeTarget, field, property};

    fn config() -> Config {
        Config {
            objects: vec![ObjectMapping {
                name: "Account".to_string(),
                hubspot_object: "companies".to_string(),
                fields: vec![
                    FieldMapping::to_property("Name", "name"),
                    FieldMapping::new("Rating__c"),
                    FieldMapping::new("SystemModstamp"),
                ],
            }],
            ..Config::default()
        }
    }

    fn account_source() -> FakeSource {
        let mut stamp = field("SystemModstamp", SalesforceType::DateTime);
        stamp.migration = Migratability::Blocked(BlockReason::SystemField);
        FakeSource::default().with_object("Account", vec![field("Name", SalesforceType::String), stamp])
    }

    #[tokio::test]
    async fn test_missing_field_fails_without_raising() {
        let source = account_source();
        let report = validate(&config(), None, Connection::Available(&source), Connection::NotConfigured).await;

        let fields = report.find("salesforce.fields.Account").unwrap();
        assert_eq!(fields.status, CheckStatus::Fail);
        assert_eq!(fields.detail, "missing: Rating__c");

        let migratable = report.find("salesforce.migratable.Account").unwrap();
        assert_eq!(migratable.status, CheckStatus::Warn);
        assert!(migratable.detail.contains("SystemModstamp (system field)"));

        assert_eq!(report.find("hubspot.connection").unwrap().status, CheckStatus::Skipped);
        assert!(report.has_failures());
    }

    #[tokio::test]
    async fn test_clean_configuration_passes() {
        let mut config = config();
        config.objects[0].fields.remove(1);
        let source = account_source();
        let target = FakeTarget::default()
            .with_properties("companies", vec![property("name", HubSpotType::String)]);

        let report = validate(&config, None, Connection::Available(&source), Connection::Available(&target)).await;

        assert!(!report.has_failures(), "{:?}", report);
        assert_eq!(report.find("hubspot.properties.companies").unwrap().status, CheckStatus::Pass);
        // Only reads
        assert_eq!(target.calls(), vec!["list companies"]);
    }

    #[tokio::test]
    async fn test_connectivity_errors_become_checks() {
        let source = FakeSource::default().with_broken_object("Account", "unavailable");
        let target = FakeTarget::unreachable();

        let report = validate(&config(), None, Connection::Available(&source), Connection::Available(&target)).await;

        assert_eq!(report.find("salesforce.describe.Account").unwrap().status, CheckStatus::Fail);
        assert!(report.find("salesforce.fields.Account").is_none());
        assert_eq!(report.find("hubspot.properties.companies").unwrap().status, CheckStatus::Fail);
    }

    #[tokio::test]
    async fn test_failed_login_is_reported() {
        let report = validate(
            &config(),
            None,
            Connection::Unavailable("authentication failed: INVALID_LOGIN".to_string()),
            Connection::NotConfigured,
        )
        .await;

        let connection = report.find("salesforce.connection").unwrap();
        assert_eq!(connection.status, CheckStatus::Fail);
        assert!(connection.detail.contains("INVALID_LOGIN"));
    }

    #[tokio::test]
    async fn test_structure_problems() {
        let mut config = config();
        config.objects[0].hubspot_object = String::new();
        config.objects[0].fields.push(FieldMapping::to_property("Title__c", "name"));
        config.sync_settings.batch_size = 0;

        let report = validate(&config, None, Connection::NotConfigured, Connection::NotConfigured).await;

        assert_eq!(report.find("objects.Account.hubspot_object").unwrap().status, CheckStatus::Fail);
        let targets = report.find("objects.Account.fields").unwrap();
        assert_eq!(targets.status, CheckStatus::Fail);
        assert!(targets.detail.contains("Name, Title__c"));
        assert_eq!(report.find("sync_settings.batch_size").unwrap().status, CheckStatus::Fail);
        assert_eq!(report.find("salesforce.connection").unwrap().status, CheckStatus::Skipped);
    }

    #[tokio::test]
    async fn test_empty_configuration() {
        let report = validate(&Config::default(), None, Connection::NotConfigured, Connection::NotConfigured).await;
        let objects = report.find("objects").unwrap();
        assert_eq!(objects.status, CheckStatus::Fail);
        assert_eq!(objects.detail, "no objects configured");
    }

    fn failures<'a>(report: &'a ValidationReport, name: &str) -> Vec<&'a str> {
        report
            .checks
            .iter()
            .filter(|c| c.name == name && c.status == CheckStatus::Fail)
            .map(|c| c.detail.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_every_config_issue_is_a_failed_check() {
        let mut config = config();
        config.objects[0].fields.push(FieldMapping::new(""));
        config.objects.push(ObjectMapping {
            name: "Account".to_string(),
            hubspot_object: "companies".to_string(),
            fields: vec![FieldMapping::new("Phone")],
        });
        config.sync_settings.max_retries = 0;

        let report = validate(&config, None, Connection::NotConfigured, Connection::NotConfigured).await;

        assert_eq!(failures(&report, "objects.Account"), vec!["object is configured more than once"]);
        assert_eq!(failures(&report, "objects.Account.fields"), vec!["field without a name"]);
        assert_eq!(failures(&report, "sync_settings.max_retries"), vec!["must allow at least one attempt"]);
        assert_eq!(report.count(CheckStatus::Fail), config.issues().len());
        assert_eq!(report.find("objects").unwrap().status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn test_selected_object_must_be_configured() {
        let source = account_source();

        let report = validate(
            &config(),
            Some("Contact"),
            Connection::Available(&source),
            Connection::NotConfigured,
        )
        .await;

        let missing = report.find("objects.Contact").unwrap();
        assert_eq!(missing.status, CheckStatus::Fail);
        assert_eq!(missing.detail, "object Contact is not configured");
        assert_eq!(report.find("objects").unwrap().status, CheckStatus::Pass);
        assert!(report.find("salesforce.describe.Account").is_none());
    }

    #[tokio::test]
    async fn test_selected_object_narrows_remote_checks() {
        let mut config = config();
        config.objects.push(ObjectMapping {
            name: "Contact".to_string(),
            hubspot_object: "contacts".to_string(),
            fields: vec![FieldMapping::new("Email")],
        });
        let source = account_source();
        let target = FakeTarget::default();

        let report = validate(
            &config,
            Some("Account"),
            Connection::Available(&source),
            Connection::Available(&target),
        )
        .await;

        assert!(report.find("salesforce.describe.Account").is_some());
        assert!(report.find("salesforce.describe.Contact").is_none());
        assert_eq!(target.calls(), vec!["list companies"]);
    }
}
