//! Errors raised by the Salesforce and HubSpot clients
//!
//! Every failure is classified as transient (worth retrying) or permanent
//! at the point it is raised, so the retry policy never inspects messages.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Timeouts, dropped connections, rate limiting and server-side errors
    #[error("transient failure: {message}")]
    Transient {
        message: String,
        /// Server-provided hint (`Retry-After`) for when to try again
        retry_after: Option<Duration>,
    },

    /// Validation, permission and not-found responses; retrying will not help
    #[error("{}", permanent_message(.status, .message))]
    Permanent { status: Option<u16>, message: String },

    /// Login failed or credentials were rejected
    #[error("authentication failed: {0}")]
    Auth(String),
}

fn permanent_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("request rejected (HTTP {}): {}", code, message),
        None => format!("request rejected: {}", message),
    }
}

impl ApiError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self::Permanent {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Permanent { status: Some(404), .. })
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Transient { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Classify a non-success HTTP response
    pub fn from_status(status: u16, body: &str, retry_after: Option<Duration>) -> Self {
        let message = summarize_body(body);

        match status {
            408 | 429 | 500..=599 => Self::Transient {
                message: format!("HTTP {}: {}", status, message),
                retry_after,
            },
            _ => Self::Permanent {
                status: Some(status),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), &err.to_string(), None);
        }

        if err.is_timeout() || err.is_connect() || err.is_request() {
            Self::transient(err.to_string())
        } else {
            Self::permanent(err.to_string())
        }
    }
}

/// Turn a non-success response into an [`ApiError`], passing successes through
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);

    let body = response.text().await.unwrap_or_default();
    log::debug!("HTTP {} response body: {}", status.as_u16(), body);

    Err(ApiError::from_status(status.as_u16(), &body, retry_after))
}

/// Pull the human-readable message out of a Salesforce or HubSpot error body
fn summarize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        // HubSpot: {"status":"error","message":"..."}
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
        // Salesforce: [{"message":"...","errorCode":"..."}]
        if let Some(first) = value.as_array().and_then(|a| a.first()) {
            let message = first.get("message").and_then(|m| m.as_str());
            let code = first.get("errorCode").and_then(|c| c.as_str());
            if let (Some(message), Some(code)) = (message, code) {
                return format!("{}: {}", code, message);
            }
        }
    }

    trimmed.chars().take(300).collect()
}
