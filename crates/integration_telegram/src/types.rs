//! Telegram Bot API wire types

use std::fmt;

use domain::ChatId;
use serde::{Deserialize, Serialize};

/// Configuration for the Telegram client
#[derive(Clone)]
pub struct TelegramClientConfig {
    /// Bot token issued by BotFather
    pub token: String,
    /// Base URL of the Bot API
    pub api_base: String,
    /// Timeout for non-polling requests in milliseconds
    pub timeout_ms: u64,
}

impl TelegramClientConfig {
    /// Default Bot API base URL
    pub const DEFAULT_API_BASE: &'static str = "https://api.telegram.org";

    /// Default request timeout (30 seconds)
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

    /// Create a new config with the required bot token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the API base URL (for self-hosted Bot API servers and tests)
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Default for TelegramClientConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

// The token grants full control of the bot and stays out of log output
impl fmt::Debug for TelegramClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClientConfig")
            .field("token", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

// ============================================================================
// Bot API Response Envelope
// ============================================================================

/// Envelope wrapping every Bot API response
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    pub ok: bool,
    /// Payload, present when `ok` is true
    #[serde(default)]
    pub result: Option<T>,
    /// Human-readable failure description
    #[serde(default)]
    pub description: Option<String>,
    /// Numeric failure code
    #[serde(default)]
    pub error_code: Option<i32>,
}

// ============================================================================
// Update and Message Types
// ============================================================================

/// One long-polling update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier
    pub update_id: i64,
    /// New incoming message, when this update carries one
    #[serde(default)]
    pub message: Option<Message>,
}

/// An incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier within the chat
    pub message_id: i64,
    /// Chat the message was sent in
    pub chat: Chat,
    /// Text content, for text messages
    #[serde(default)]
    pub text: Option<String>,
    /// Attached file, for document messages
    #[serde(default)]
    pub document: Option<DocumentAttachment>,
    /// Available photo sizes, smallest first, for photo messages
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
}

impl Message {
    /// Chat this message belongs to
    #[must_use]
    pub fn chat_id(&self) -> ChatId {
        ChatId::new(self.chat.id)
    }

    /// The bot command carried by this message, if any
    ///
    /// Strips the `@BotName` suffix used when addressing a specific bot in
    /// group chats.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        let text = self.text.as_deref()?.trim();
        if !text.starts_with('/') {
            return None;
        }
        let first = text.split_whitespace().next()?;
        first.split('@').next()
    }

    /// Highest-resolution photo size, if this is a photo message
    #[must_use]
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photo.as_ref().and_then(|sizes| sizes.last())
    }
}

/// A Telegram chat
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Unique chat identifier; negative for groups
    pub id: i64,
}

/// A document attached to a message
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentAttachment {
    /// Identifier used to fetch the file
    pub file_id: String,
    /// File name as declared by the sender
    #[serde(default)]
    pub file_name: Option<String>,
    /// MIME type as declared by the sender
    #[serde(default)]
    pub mime_type: Option<String>,
    /// File size in bytes
    #[serde(default)]
    pub file_size: Option<i64>,
}

/// One available resolution of a photo
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    /// Identifier used to fetch the file
    pub file_id: String,
    /// Photo width in pixels
    pub width: i32,
    /// Photo height in pixels
    pub height: i32,
    /// File size in bytes
    #[serde(default)]
    pub file_size: Option<i64>,
}

/// File metadata returned by `getFile`
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    /// Identifier of the file
    pub file_id: String,
    /// File size in bytes
    #[serde(default)]
    pub file_size: Option<i64>,
    /// Download path, valid for at least an hour
    #[serde(default)]
    pub file_path: Option<String>,
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Parameters for `getUpdates`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GetUpdatesParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}

/// Parameters for `getFile`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GetFileParams<'a> {
    pub file_id: &'a str,
}

/// Parameters for `sendMessage`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendMessageParams<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}
