//! Telegram transport configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Telegram integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// Base URL of the Bot API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Long-poll timeout in seconds
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,

    /// Pause before the next poll after a transport error, in seconds
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field(
                "token",
                &if self.token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("api_base", &self.api_base)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("error_backoff_secs", &self.error_backoff_secs)
            .finish()
    }
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_poll_timeout_secs() -> u64 {
    30
}

const fn default_error_backoff_secs() -> u64 {
    5
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: default_api_base(),
            poll_timeout_secs: default_poll_timeout_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}

impl TelegramConfig {
    /// Get the bot token as a string reference (for API calls)
    #[must_use]
    pub fn token_str(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }
}
