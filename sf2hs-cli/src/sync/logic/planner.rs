//! Schema fetching and planning for configured objects

use thiserror::Error;

use crate::api::default_property_group;
use crate::api::error::ApiError;
use crate::api::metadata::{FieldDescriptor, PropertyDescriptor};
use crate::api::schema::{SourceSchema, TargetSchema};
use crate::config::{ConfigError, HubSpotSettings, ObjectMapping};
use crate::sync::types::ObjectPlan;

use super::resolver::resolve;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to describe Salesforce object '{object}': {source}")]
    Describe { object: String, source: ApiError },

    #[error("failed to list HubSpot properties for '{object_type}': {source}")]
    ListProperties { object_type: String, source: ApiError },
}

/// Fetch the source fields of `object`; a missing object yields no fields
/// so every mapping resolves to a missing-source error
pub async fn fetch_source_fields(
    source: &dyn SourceSchema,
    object: &str,
) -> Result<Vec<FieldDescriptor>, PlanError> {
    match source.describe_object(object).await {
        Ok(fields) => {
            log::debug!("Described {}: {} fields", object, fields.len());
            Ok(fields)
        }
        Err(err) if err.is_not_found() => {
            log::warn!("Salesforce object '{}' does not exist", object);
            Ok(Vec::new())
        }
        Err(source) => Err(PlanError::Describe {
            object: object.to_string(),
            source,
        }),
    }
}

/// Fetch existing properties; without a target every property is treated as absent
pub async fn fetch_target_properties(
    target: Option<&dyn TargetSchema>,
    object_type: &str,
) -> Result<Vec<PropertyDescriptor>, PlanError> {
    let Some(target) = target else {
        log::warn!(
            "No HubSpot access; planning '{}' against an empty property set",
            object_type
        );
        return Ok(Vec::new());
    };

    target
        .list_properties(object_type)
        .await
        .map_err(|source| PlanError::ListProperties {
            object_type: object_type.to_string(),
            source,
        })
}

/// Describe, list and resolve one configured object
pub async fn plan_object(
    object: &ObjectMapping,
    source: &dyn SourceSchema,
    target: Option<&dyn TargetSchema>,
    hubspot: &HubSpotSettings,
) -> Result<ObjectPlan, PlanError> {
    // Duplicate targets are a configuration error; report them before any call
    let duplicates = object.duplicate_targets();
    if !duplicates.is_empty() {
        return Err(ConfigError::DuplicateTargets {
            object: object.name.clone(),
            duplicates,
        }
        .into());
    }

    let source_fields = fetch_source_fields(source, &object.name).await?;
    let target_properties = fetch_target_properties(target, &object.hubspot_object).await?;
    let items = resolve(object, &source_fields, &target_properties)?;

    Ok(ObjectPlan {
        source_object: object.name.clone(),
        target_object: object.hubspot_object.clone(),
        property_group: hubspot
            .property_group
            .clone()
            .unwrap_or_else(|| default_property_group(&object.hubspot_object)),
        items,
    })
}
