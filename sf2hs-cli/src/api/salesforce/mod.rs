//! Salesforce API access

pub mod auth;
pub mod client;

pub use auth::Session;
pub use client::{DescribeResponse, SalesforceClient, describe_to_fields};
