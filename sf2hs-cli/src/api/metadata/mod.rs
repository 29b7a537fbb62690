//! Salesforce and HubSpot schema metadata

pub mod migration;
pub mod models;
pub mod types;

pub use migration::{BlockReason, FieldFacts, Migratability, MigrationPolicy, MigrationRules};
pub use models::{
    FieldDescriptor, NewProperty, PicklistValue, PropertyDescriptor, PropertyOption, PropertyUpdate,
};
pub use types::{HubSpotType, SalesforceType};
