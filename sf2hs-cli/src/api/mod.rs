//! Salesforce and HubSpot API access
//!
//! This module provides the schema metadata model shared by both systems,
//! thin HTTP clients for the Salesforce describe API and the HubSpot
//! properties API, the collaborator traits the sync core is written against,
//! and the retry policy wrapping mutating calls.

pub mod error;
pub mod hubspot;
pub mod metadata;
pub mod resilience;
pub mod salesforce;
pub mod schema;

pub use error::ApiError;
pub use hubspot::{HubSpotClient, default_property_group};
pub use metadata::{
    BlockReason, FieldDescriptor, HubSpotType, Migratability, MigrationPolicy, MigrationRules,
    NewProperty, PicklistValue, PropertyDescriptor, PropertyOption, SalesforceType,
};
pub use resilience::{RetryConfig, RetryOutcome, RetryPolicy};
pub use salesforce::SalesforceClient;
pub use schema::{SourceSchema, TargetSchema};
