//! HubSpot CRM properties API client

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::api::error::{ApiError, ensure_success};
use crate::api::metadata::{HubSpotType, NewProperty, PropertyDescriptor, PropertyUpdate};
use crate::api::schema::TargetSchema;
use crate::config::{HubSpotCredentials, HubSpotSettings};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Private-app authenticated HubSpot client
#[derive(Clone)]
pub struct HubSpotClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl std::fmt::Debug for HubSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpotClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HubSpotClient {
    pub fn new(settings: &HubSpotSettings, credentials: &HubSpotCredentials) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::permanent(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_token: credentials.access_token.clone(),
        })
    }

    fn properties_url(&self, object_type: &str) -> String {
        format!(
            "{}/crm/v3/properties/{}",
            self.base_url,
            urlencoding::encode(object_type)
        )
    }
}

#[async_trait]
impl TargetSchema for HubSpotClient {
    async fn list_properties(&self, object_type: &str) -> Result<Vec<PropertyDescriptor>, ApiError> {
        let url = self.properties_url(object_type);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let page: PropertiesPage = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::permanent(format!("malformed properties response for {}: {}", object_type, e)))?;

        log::debug!("HubSpot {} has {} properties", object_type, page.results.len());
        Ok(page.results.into_iter().map(PropertyDescriptor::from).collect())
    }

    async fn create_property(&self, object_type: &str, property: &NewProperty) -> Result<(), ApiError> {
        let url = self.properties_url(object_type);
        log::debug!("POST {} ({})", url, property.name);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(property)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn update_property(
        &self,
        object_type: &str,
        name: &str,
        update: &PropertyUpdate,
    ) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.properties_url(object_type), urlencoding::encode(name));
        log::debug!(
            "PATCH {} -> {} ({} option(s))",
            url,
            update.property_type,
            update.options.len()
        );

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.access_token)
            .json(update)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct PropertiesPage {
    #[serde(default)]
    results: Vec<HubSpotProperty>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HubSpotProperty {
    name: String,
    #[serde(default)]
    label: String,
    #[serde(rename = "type")]
    property_type: String,
    #[serde(default)]
    field_type: String,
    #[serde(default)]
    group_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    modification_metadata: Option<ModificationMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModificationMetadata {
    #[serde(default)]
    read_only_definition: bool,
}

impl From<HubSpotProperty> for PropertyDescriptor {
    fn from(p: HubSpotProperty) -> Self {
        PropertyDescriptor {
            name: p.name,
            label: p.label,
            property_type: HubSpotType::from_api_name(&p.property_type),
            field_type: p.field_type,
            read_only: p.modification_metadata.unwrap_or_default().read_only_definition,
            group_name: p.group_name.filter(|g| !g.is_empty()),
            description: p.description.filter(|d| !d.is_empty()),
        }
    }
}
