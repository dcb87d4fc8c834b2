//! Prompt messages submitted to the completion provider

use serde::{Deserialize, Serialize};

/// Role of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instruction from the user
    User,
    /// Prior provider output
    Assistant,
    /// System prompt or instruction
    System,
}

/// Payload of a prompt message; textual or multimodal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptContent {
    /// Plain instruction text
    Text(String),
    /// Instruction text accompanied by one inline image
    TextWithImage {
        /// Instruction text shown alongside the image
        text: String,
        /// `data:image/<subtype>;base64,<payload>` URI
        image_data_uri: String,
    },
}

/// A single role-tagged message in a completion request
///
/// Requests built by this system carry exactly one user message and no
/// conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Role of the sender
    pub role: MessageRole,
    /// Message payload
    pub content: PromptContent,
}

impl PromptMessage {
    /// Create a user message with plain text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: PromptContent::Text(text.into()),
        }
    }

    /// Create a user message carrying an inline image
    pub fn user_with_image(
        text: impl Into<String>,
        image_data_uri: impl Into<String>,
    ) -> Self {
        Self {
            role: MessageRole::User,
            content: PromptContent::TextWithImage {
                text: text.into(),
                image_data_uri: image_data_uri.into(),
            },
        }
    }

    /// The plain text of this message, if it has one
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.content {
            PromptContent::Text(text) | PromptContent::TextWithImage { text, .. } => text,
        }
    }
}
