//! Retry handling for HubSpot schema mutations

pub mod config;
pub mod retry;

pub use config::{RetryConfig, RetryConfigBuilder};
pub use retry::{RetryOutcome, RetryPolicy};
