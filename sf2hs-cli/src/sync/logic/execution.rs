//! Plan execution
//!
//! Walks a resolved plan in order and issues the create and update calls
//! against HubSpot. Every call goes through the retry policy; a failed item
//! is recorded and the walk continues with the next one.

use log::{debug, info, warn};

use crate::api::metadata::{FieldDescriptor, HubSpotType, NewProperty, PropertyOption, PropertyUpdate};
use crate::api::resilience::RetryPolicy;
use crate::api::schema::TargetSchema;
use crate::sync::types::{Decision, ObjectPlan, ResolvedItem, SyncOutcome, SyncResult};

/// Execute one object's plan
pub async fn execute_plan(
    plan: &ObjectPlan,
    target: &dyn TargetSchema,
    policy: &RetryPolicy,
) -> Vec<SyncResult> {
    execute(
        &plan.target_object,
        &plan.property_group,
        &plan.items,
        target,
        policy,
    )
    .await
}

/// Execute resolved items against `object_type`, one result per item
///
/// Only `Create` and `Update` items reach the target; everything else is
/// reported as skipped with its resolution reason.
pub async fn execute(
    object_type: &str,
    property_group: &str,
    items: &[ResolvedItem],
    target: &dyn TargetSchema,
    policy: &RetryPolicy,
) -> Vec<SyncResult> {
    let mut results = Vec::with_capacity(items.len());

    for item in items {
        let result = match (item.decision, item.source_field.as_ref()) {
            (Decision::Create, Some(field)) => {
                create(object_type, property_group, item, field, target, policy).await
            }
            (Decision::Update, Some(field)) => update(object_type, item, field, target, policy).await,
            (Decision::Create | Decision::Update, None) => SyncResult {
                field_name: item.mapping.name.clone(),
                target_name: item.target_name.clone(),
                decision: item.decision,
                outcome: SyncOutcome::Failed,
                detail: Some("no source field metadata to build the property from".to_string()),
                attempts: 0,
            },
            _ => SyncResult {
                field_name: item.mapping.name.clone(),
                target_name: item.target_name.clone(),
                decision: item.decision,
                outcome: SyncOutcome::Skipped,
                detail: Some(item.reason.clone()),
                attempts: 0,
            },
        };

        match result.outcome {
            SyncOutcome::Applied => info!(
                "{} {}.{} ({} attempt(s))",
                result.decision, object_type, result.target_name, result.attempts
            ),
            SyncOutcome::Failed => warn!(
                "{} {}.{} failed: {}",
                result.decision,
                object_type,
                result.target_name,
                result.detail.as_deref().unwrap_or("unknown error")
            ),
            SyncOutcome::Skipped => debug!(
                "Skipped {}.{}: {}",
                object_type,
                result.target_name,
                result.detail.as_deref().unwrap_or_default()
            ),
        }

        results.push(result);
    }

    results
}

async fn create(
    object_type: &str,
    property_group: &str,
    item: &ResolvedItem,
    field: &FieldDescriptor,
    target: &dyn TargetSchema,
    policy: &RetryPolicy,
) -> SyncResult {
    let new_property = build_new_property(&item.target_name, field, property_group);
    let operation = format!("create {}.{}", object_type, item.target_name);

    let outcome = policy
        .execute(&operation, || target.create_property(object_type, &new_property))
        .await;

    to_result(item, outcome.result, outcome.attempts)
}

async fn update(
    object_type: &str,
    item: &ResolvedItem,
    field: &FieldDescriptor,
    target: &dyn TargetSchema,
    policy: &RetryPolicy,
) -> SyncResult {
    let update = build_property_update(field);
    let operation = format!("update {}.{}", object_type, item.target_name);

    let outcome = policy
        .execute(&operation, || {
            target.update_property(object_type, &item.target_name, &update)
        })
        .await;

    to_result(item, outcome.result, outcome.attempts)
}

fn to_result(
    item: &ResolvedItem,
    result: Result<(), crate::api::ApiError>,
    attempts: u32,
) -> SyncResult {
    let (outcome, detail) = match result {
        Ok(()) => (SyncOutcome::Applied, None),
        Err(err) => (SyncOutcome::Failed, Some(err.to_string())),
    };

    SyncResult {
        field_name: item.mapping.name.clone(),
        target_name: item.target_name.clone(),
        decision: item.decision,
        outcome,
        detail,
        attempts,
    }
}

/// Property definition created for a Salesforce field
pub fn build_new_property(name: &str, field: &FieldDescriptor, property_group: &str) -> NewProperty {
    let property_type = field.hubspot_type();
    let label = if field.label.trim().is_empty() {
        field.name.clone()
    } else {
        field.label.clone()
    };

    let options = property_options(&property_type, field);

    NewProperty {
        name: name.to_string(),
        description: format!("Migrated from Salesforce field {} ({})", label, field.name),
        label,
        field_type: property_type
            .default_field_type(Some(&field.field_type))
            .to_string(),
        property_type,
        group_name: property_group.to_string(),
        options,
    }
}

/// Retyping payload that brings an existing property in line with `field`
pub fn build_property_update(field: &FieldDescriptor) -> PropertyUpdate {
    let property_type = field.hubspot_type();
    PropertyUpdate {
        field_type: property_type
            .default_field_type(Some(&field.field_type))
            .to_string(),
        options: property_options(&property_type, field),
        property_type,
    }
}

/// Option set for enumeration and bool properties; empty for other types
fn property_options(property_type: &HubSpotType, field: &FieldDescriptor) -> Vec<PropertyOption> {
    match property_type {
        HubSpotType::Enumeration => field
            .picklist_values
            .iter()
            .enumerate()
            .map(|(i, value)| PropertyOption::new(&value.label, &value.value, i as i32))
            .collect(),
        HubSpotType::Bool => vec![
            PropertyOption::new("Yes", "true", 0),
            PropertyOption::new("No", "false", 1),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::api::error::ApiError;
    use crate::api::metadata::{PicklistValue, SalesforceType};
    use crate::api::resilience::RetryConfig;
    use crate::config::{FieldMapping, ObjectMapping};
    use crate::sync::logic::resolver::resolve;
    use crate::sync::logic::test_support::{FakeTarget, field, property};

    fn policy(max_attempts: u32, delay_secs: u64) -> RetryPolicy {
        RetryPolicy::new(
            RetryConfig::builder()
                .max_attempts(max_attempts)
                .delay(Duration::from_secs(delay_secs))
                .build(),
        )
    }

    fn account_plan(
        mappings: Vec<FieldMapping>,
        source: &[FieldDescriptor],
        target: &FakeTarget,
    ) -> ObjectPlan {
        let object = ObjectMapping {
            name: "Account".to_string(),
            hubspot_object: "companies".to_string(),
            fields: mappings,
        };
        ObjectPlan {
            source_object: object.name.clone(),
            target_object: object.hubspot_object.clone(),
            property_group: "companyinformation".to_string(),
            items: resolve(&object, source, &target.snapshot("companies")).unwrap(),
        }
    }

    fn outcomes(results: &[SyncResult]) -> Vec<SyncOutcome> {
        results.iter().map(|r| r.outcome).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_retried_through_transient_failures_is_applied() {
        let target = FakeTarget::default().failing(
            "Type",
            vec![ApiError::transient("timed out"), ApiError::transient("timed out")],
        );
        let source = vec![field("Type", SalesforceType::Picklist)];
        let plan = account_plan(vec![FieldMapping::new("Type")], &source, &target);
        let started = tokio::time::Instant::now();

        let results = execute_plan(&plan, &target, &policy(3, 5)).await;

        assert_eq!(results[0].outcome, SyncOutcome::Applied);
        assert_eq!(results[0].attempts, 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_stop_remaining_items() {
        let target = FakeTarget::default().failing(
            "Industry",
            vec![ApiError::from_status(400, r#"{"message":"Property group does not exist"}"#, None)],
        );
        let source = vec![
            field("Industry", SalesforceType::Picklist),
            field("Website", SalesforceType::Url),
        ];
        let plan = account_plan(
            vec![FieldMapping::new("Industry"), FieldMapping::new("Website")],
            &source,
            &target,
        );

        let results = execute_plan(&plan, &target, &policy(3, 5)).await;

        assert_eq!(outcomes(&results), vec![SyncOutcome::Failed, SyncOutcome::Applied]);
        assert_eq!(results[0].attempts, 1);
        assert!(results[0].detail.as_deref().unwrap().contains("Property group does not exist"));
        assert_eq!(
            target.calls(),
            vec!["create companies.Industry", "create companies.Website"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_record_last_error() {
        let target = FakeTarget::default().failing(
            "Website",
            vec![
                ApiError::from_status(503, "unavailable", None),
                ApiError::from_status(429, "slow down", None),
            ],
        );
        let source = vec![field("Website", SalesforceType::Url)];
        let plan = account_plan(vec![FieldMapping::new("Website")], &source, &target);

        let results = execute_plan(&plan, &target, &policy(2, 1)).await;

        assert_eq!(results[0].outcome, SyncOutcome::Failed);
        assert_eq!(results[0].attempts, 2);
        assert!(results[0].detail.as_deref().unwrap().contains("slow down"));
    }

    #[tokio::test]
    async fn test_non_actionable_items_are_skipped_without_calls() {
        let target = FakeTarget::default().with_properties(
            "companies",
            vec![property("name", HubSpotType::String)],
        );
        let source = vec![field("Name", SalesforceType::String)];
        let plan = account_plan(
            vec![FieldMapping::to_property("Name", "name"), FieldMapping::new("Missing__c")],
            &source,
            &target,
        );

        let results = execute_plan(&plan, &target, &policy(3, 5)).await;

        assert_eq!(outcomes(&results), vec![SyncOutcome::Skipped, SyncOutcome::Skipped]);
        assert_eq!(results[1].detail.as_deref(), Some("source field not found"));
        assert!(results.iter().all(|r| r.attempts == 0));
        assert!(target.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rerun_after_success_is_unchanged() {
        let target = FakeTarget::default().with_properties(
            "companies",
            vec![property("annualrevenue", HubSpotType::String)],
        );
        let source = vec![
            field("Type", SalesforceType::Picklist),
            field("AnnualRevenue", SalesforceType::Currency),
            field("Active__c", SalesforceType::Boolean),
        ];
        let mappings = vec![
            FieldMapping::new("Type"),
            FieldMapping::to_property("AnnualRevenue", "annualrevenue"),
            FieldMapping::new("Active__c"),
        ];

        let plan = account_plan(mappings.clone(), &source, &target);
        let results = execute_plan(&plan, &target, &policy(1, 0)).await;
        assert!(results.iter().all(|r| r.outcome == SyncOutcome::Applied));

        let replanned = account_plan(mappings, &source, &target);
        assert!(replanned.items.iter().all(|i| i.decision == Decision::SkipUnchanged));
    }

    #[tokio::test]
    async fn test_retype_to_picklist_sends_its_options() {
        let target = FakeTarget::default().with_properties(
            "companies",
            vec![property("rating", HubSpotType::String)],
        );
        let mut rating = field("Rating", SalesforceType::Picklist);
        rating.picklist_values = vec![
            PicklistValue {
                label: "Hot".to_string(),
                value: "Hot".to_string(),
            },
            PicklistValue {
                label: "Cold".to_string(),
                value: "Cold".to_string(),
            },
        ];
        let plan = account_plan(
            vec![FieldMapping::to_property("Rating", "rating")],
            &[rating],
            &target,
        );
        assert_eq!(plan.items[0].decision, Decision::Update);

        let results = execute_plan(&plan, &target, &policy(1, 0)).await;

        assert_eq!(results[0].outcome, SyncOutcome::Applied);
        let updates = target.updates();
        assert_eq!(updates.len(), 1);
        let (name, update) = &updates[0];
        assert_eq!(name, "rating");
        assert_eq!(update.property_type, HubSpotType::Enumeration);
        assert_eq!(update.field_type, "select");
        let values: Vec<_> = update.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Hot", "Cold"]);
    }

    #[test]
    fn test_retype_to_bool_carries_yes_no() {
        let update = build_property_update(&field("Active__c", SalesforceType::Boolean));

        assert_eq!(update.property_type, HubSpotType::Bool);
        let labels: Vec<_> = update.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Yes", "No"]);
    }

    #[test]
    fn test_retype_to_number_has_no_options() {
        let update = build_property_update(&field("AnnualRevenue", SalesforceType::Currency));
        assert_eq!(update.property_type, HubSpotType::Number);
        assert!(update.options.is_empty());
    }

    #[test]
    fn test_new_property_from_picklist() {
        let mut industry = field("Industry", SalesforceType::Picklist);
        industry.label = "Industry".to_string();
        industry.picklist_values = vec![
            PicklistValue {
                label: "Banking".to_string(),
                value: "Banking".to_string(),
            },
            PicklistValue {
                label: "Retail & Consumer".to_string(),
                value: "Retail".to_string(),
            },
        ];

        let property = build_new_property("industry", &industry, "companyinformation");

        assert_eq!(property.name, "industry");
        assert_eq!(property.property_type, HubSpotType::Enumeration);
        assert_eq!(property.field_type, "select");
        assert_eq!(property.group_name, "companyinformation");
        assert_eq!(property.description, "Migrated from Salesforce field Industry (Industry)");
        assert_eq!(property.options.len(), 2);
        assert_eq!(property.options[1].value, "Retail");
        assert_eq!(property.options[1].display_order, 1);
    }

    #[test]
    fn test_new_property_from_boolean_has_options() {
        let active = field("Active__c", SalesforceType::Boolean);
        let property = build_new_property("Active__c", &active, "companyinformation");

        assert_eq!(property.property_type, HubSpotType::Bool);
        assert_eq!(property.field_type, "booleancheckbox");
        let values: Vec<_> = property.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["true", "false"]);
    }

    #[test]
    fn test_blank_label_falls_back_to_name() {
        let mut website = field("Website", SalesforceType::Url);
        website.label = String::new();
        let property = build_new_property("website", &website, "companyinformation");
        assert_eq!(property.label, "Website");
        assert!(property.options.is_empty());
    }
}
