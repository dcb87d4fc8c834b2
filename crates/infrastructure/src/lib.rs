//! Infrastructure layer - Configuration and adapters
//!
//! Implements the application's ports on top of the capability crates and
//! loads runtime configuration from file and environment.

pub mod adapters;
pub mod config;

pub use adapters::{CompletionAdapter, DocumentAdapter};
pub use config::{AppConfig, TelegramConfig};
