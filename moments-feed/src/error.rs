//! Error types for the moments HTTP client
//!
//! Transport failures and non-2xx statuses deliberately share one message
//! shape, `Failed to <action>`, which is what the feed shows to users. The
//! underlying cause stays reachable through [`std::error::Error::source`] and
//! the structured fields for logging.

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response (DNS, connect, reset, ...)
    #[error("Failed to {action}")]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Response arrived with a non-2xx status
    #[error("Failed to {action}")]
    Status {
        action: &'static str,
        status: StatusCode,
    },

    /// Response body was not the expected JSON
    #[error("{source}")]
    Decode {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Envelope parsed but its payload could not be typed
    #[error("Invalid response payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Base URL cannot carry path segments
    #[error("Invalid API URL: {0}")]
    Url(String),
}

impl ClientError {
    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport { source, .. } | ClientError::Decode { source, .. } => {
                source.status()
            }
            _ => None,
        }
    }
}

/// Result type for client calls
pub type ClientResult<T> = Result<T, ClientError>;
