//! Retry configuration with builder pattern
//!
//! Mirrors the `sync_settings` section of the YAML configuration: a bounded
//! number of attempts with a fixed pause between them.

use std::time::Duration;

use crate::config::SyncSettings;

/// Configuration for retrying mutating HubSpot calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts per call, including the first one
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
    /// Upper bound for server-provided `Retry-After` hints
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Create a new builder for RetryConfig
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::new()
    }

    /// Build from the `sync_settings` configuration section
    pub fn from_sync_settings(settings: &SyncSettings) -> Self {
        Self::builder()
            .max_attempts(settings.max_retries)
            .delay(Duration::from_secs(settings.retry_delay))
            .build()
    }

    /// Pause before the next attempt, honouring a capped server hint
    pub fn delay_for(&self, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(hint) => self.delay.max(hint.min(self.max_delay)),
            None => self.delay,
        }
    }
}

/// Builder for RetryConfig
#[derive(Debug)]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RetryConfig::default(),
        }
    }

    /// Set total attempts; zero is treated as one
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts.max(1);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.config.max_delay = max_delay;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> RetryConfig {
        self.config
    }
}

impl Default for RetryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
