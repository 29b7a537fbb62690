//! Bounded retry policy for outbound calls
//!
//! Transient failures are retried after a fixed pause until the attempt
//! budget is spent; permanent failures return immediately.

use std::future::Future;

use log::{debug, warn};

use super::config::RetryConfig;
use crate::api::error::ApiError;

/// Result of running an operation under a [`RetryPolicy`]
#[derive(Debug)]
pub struct RetryOutcome<T> {
    pub result: Result<T, ApiError>,
    /// Attempts made, including the successful one
    pub attempts: u32,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Run `operation` until it succeeds, fails permanently, or runs out of attempts
    pub async fn execute<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> RetryOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}", operation_name, attempt);
                    }
                    return RetryOutcome {
                        result: Ok(value),
                        attempts: attempt,
                    };
                }
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.config.delay_for(err.retry_after());
                    warn!(
                        "{} failed (attempt {}/{}): {}; retrying in {:?}",
                        operation_name, attempt, max_attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    debug!(
                        "{} giving up after {} attempt(s): {}",
                        operation_name, attempt, err
                    );
                    return RetryOutcome {
                        result: Err(err),
                        attempts: attempt,
                    };
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
