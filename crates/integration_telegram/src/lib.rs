//! Telegram Bot API integration
//!
//! This crate provides a thin client for the Telegram Bot API using long
//! polling. It covers exactly the methods the bot needs: receiving
//! updates, fetching attachments, and sending replies and documents.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐      HTTPS (long poll)     ┌─────────────────┐
//! │  TelegramClient  │ ◄────────────────────────► │  Telegram Bot   │
//! │  (This crate)    │    getUpdates / send*      │      API        │
//! └──────────────────┘                            └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use integration_telegram::{TelegramClient, TelegramClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TelegramClientConfig::new("123456:ABC-DEF");
//! let client = TelegramClient::new(config)?;
//!
//! let updates = client.get_updates(None, 30).await?;
//! for update in updates {
//!     if let Some(message) = update.message {
//!         client.send_message(message.chat_id(), "Привет!").await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

pub use client::TelegramClient;
pub use error::TelegramError;
pub use types::{
    ApiResponse, Chat, DocumentAttachment, FileInfo, Message, PhotoSize, TelegramClientConfig,
    Update,
};
