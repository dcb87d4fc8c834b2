//! Error types for Telegram integration

use thiserror::Error;

/// Errors that can occur during Telegram Bot API operations
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Bot API rejected the call
    #[error("API error (code {code}): {message}")]
    Api {
        /// Error code reported by the Bot API
        code: i32,
        /// Human-readable description
        message: String,
    },

    /// Missing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// getFile returned no downloadable path
    #[error("No file path returned for file: {0}")]
    MissingFilePath(String),
}

impl TelegramError {
    /// Create an API error
    #[must_use]
    pub fn api(code: i32, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error is retryable on the next poll cycle
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
