//! Application configuration
//!
//! Split into focused sub-modules:
//! - `telegram`: bot transport settings
//!
//! The completion and filing sections reuse the config types of the crates
//! that consume them.

mod telegram;

use ai_core::CompletionConfig;
use doc_engine::FilingConfig;
use serde::{Deserialize, Serialize};

pub use telegram::TelegramConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Telegram transport configuration
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Completion provider configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Filing output configuration
    #[serde(default)]
    pub filing: FilingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml`, and environment
    ///
    /// Environment variables use the `BANKROT` prefix, e.g.
    /// `BANKROT_TELEGRAM_TOKEN`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("completion.base_url", "https://api.openai.com/v1")?
            .set_default("completion.default_model", "gpt-4o-mini")?
            .set_default("filing.output_dir", ".")?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., BANKROT_TELEGRAM_TOKEN)
            .add_source(
                config::Environment::with_prefix("BANKROT")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
