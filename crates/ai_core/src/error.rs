//! Completion provider errors

use thiserror::Error;

/// Errors that can occur while talking to the completion provider
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider returned no generated message
    #[error("Empty response: no choices returned")]
    EmptyResponse,

    /// Timeout waiting for the provider
    #[error("Completion timeout after {0}ms")]
    Timeout(u64),

    /// Provider returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
