//! Salesforce REST client: object describe calls

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::auth::{self, Session};
use crate::api::error::{ApiError, ensure_success};
use crate::api::metadata::{
    FieldDescriptor, FieldFacts, MigrationPolicy, PicklistValue, SalesforceType,
};
use crate::api::schema::SourceSchema;
use crate::config::{SalesforceCredentials, SalesforceSettings};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Authenticated Salesforce client
#[derive(Clone)]
pub struct SalesforceClient {
    http: reqwest::Client,
    session: Session,
    api_version: String,
    rules: Arc<dyn MigrationPolicy>,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.session.instance_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl SalesforceClient {
    /// Log in and return a client bound to the resulting session
    pub async fn connect(
        settings: &SalesforceSettings,
        credentials: &SalesforceCredentials,
        rules: Arc<dyn MigrationPolicy>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::permanent(format!("failed to build HTTP client: {}", e)))?;

        let session = auth::login(&http, &settings.instance_url, &settings.api_version, credentials).await?;
        log::info!("Authenticated with Salesforce at {}", session.instance_url);

        Ok(Self {
            http,
            session,
            api_version: settings.api_version.clone(),
            rules,
        })
    }

    /// Raw describe call for an object
    pub async fn describe(&self, object_name: &str) -> Result<DescribeResponse, ApiError> {
        let url = format!(
            "{}/services/data/v{}/sobjects/{}/describe",
            self.session.instance_url,
            self.api_version,
            urlencoding::encode(object_name)
        );
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.session.session_id)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        response
            .json::<DescribeResponse>()
            .await
            .map_err(|e| ApiError::permanent(format!("malformed describe response for {}: {}", object_name, e)))
    }
}

#[async_trait]
impl SourceSchema for SalesforceClient {
    async fn describe_object(&self, object_name: &str) -> Result<Vec<FieldDescriptor>, ApiError> {
        let describe = self.describe(object_name).await?;
        log::debug!("Describe {} returned {} fields", object_name, describe.fields.len());
        Ok(describe_to_fields(describe, self.rules.as_ref()))
    }
}

/// Subset of the sObject describe payload this tool reads
#[derive(Debug, Clone, Deserialize)]
pub struct DescribeResponse {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub fields: Vec<DescribeField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default = "default_true")]
    pub nillable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub calculated: bool,
    #[serde(default)]
    pub reference_to: Vec<String>,
    #[serde(default)]
    pub picklist_values: Vec<DescribePicklistValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescribePicklistValue {
    #[serde(default)]
    pub label: Option<String>,
    pub value: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Convert a describe payload into field descriptors, assessing migratability
pub fn describe_to_fields(describe: DescribeResponse, rules: &dyn MigrationPolicy) -> Vec<FieldDescriptor> {
    describe
        .fields
        .into_iter()
        .map(|field| {
            let field_type = SalesforceType::from_api_name(&field.field_type);
            let migration = rules.assess(&FieldFacts {
                name: &field.name,
                field_type: &field_type,
                calculated: field.calculated,
                reference_to: &field.reference_to,
            });

            let picklist_values = if field_type.is_picklist() {
                field
                    .picklist_values
                    .into_iter()
                    .filter(|v| v.active)
                    .map(|v| PicklistValue {
                        label: v.label.unwrap_or_else(|| v.value.clone()),
                        value: v.value,
                    })
                    .collect()
            } else {
                Vec::new()
            };

            FieldDescriptor {
                name: field.name,
                label: field.label,
                field_type,
                migration,
                required: !field.nillable,
                unique: field.unique,
                updateable: field.updateable,
                createable: field.createable,
                length: field.length.filter(|l| *l > 0),
                precision: field.precision.filter(|p| *p > 0),
                // Scale only means something alongside a precision
                scale: field.precision.filter(|p| *p > 0).and(field.scale),
                reference_to: field.reference_to,
                picklist_values,
            }
        })
        .collect()
}
