//! Collaborator traits the sync core talks to
//!
//! The resolver, executor and validator only see these traits; the HTTP
//! clients, the fields-file source and the in-memory fakes used by tests all
//! implement them.

use async_trait::async_trait;

use super::error::ApiError;
use super::metadata::{FieldDescriptor, NewProperty, PropertyDescriptor, PropertyUpdate};

/// Source system: field metadata of Salesforce objects
#[async_trait]
pub trait SourceSchema: Send + Sync {
    async fn describe_object(&self, object_name: &str) -> Result<Vec<FieldDescriptor>, ApiError>;
}

/// Target system: HubSpot property definitions
#[async_trait]
pub trait TargetSchema: Send + Sync {
    async fn list_properties(&self, object_type: &str) -> Result<Vec<PropertyDescriptor>, ApiError>;

    async fn create_property(&self, object_type: &str, property: &NewProperty) -> Result<(), ApiError>;

    async fn update_property(
        &self,
        object_type: &str,
        name: &str,
        update: &PropertyUpdate,
    ) -> Result<(), ApiError>;
}
