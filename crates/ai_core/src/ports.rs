//! Port definitions for the completion provider
//!
//! Defines the trait (port) that completion adapters must implement, plus
//! the OpenAI-compatible request/response types shared by them.

use async_trait::async_trait;
use domain::{MessageRole, PromptContent, PromptMessage};
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// Request for a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Role-tagged messages to submit
    pub messages: Vec<CompletionMessage>,
    /// Model override; falls back to the configured default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Generation budget in tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A message in the completion request (OpenAI-compatible format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: MessageContent,
}

/// Message content: a plain string or an ordered list of typed blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Multimodal content blocks
    Blocks(Vec<ContentBlock>),
}

/// A typed block in a multimodal message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text block
    Text {
        /// Instruction text
        text: String,
    },
    /// Image reference block
    ImageUrl {
        /// Image location
        image_url: ImageUrl,
    },
}

/// Image reference carried by an `image_url` block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Image location; always a base64 data URI in this system
    pub url: String,
}

impl From<&PromptMessage> for CompletionMessage {
    fn from(msg: &PromptMessage) -> Self {
        let role = match msg.role {
            MessageRole::User => "user".to_string(),
            MessageRole::Assistant => "assistant".to_string(),
            MessageRole::System => "system".to_string(),
        };
        let content = match &msg.content {
            PromptContent::Text(text) => MessageContent::Text(text.clone()),
            PromptContent::TextWithImage {
                text,
                image_data_uri,
            } => MessageContent::Blocks(vec![
                ContentBlock::Text { text: text.clone() },
                ContentBlock::ImageUrl {
                    image_url: ImageUrl {
                        url: image_data_uri.clone(),
                    },
                },
            ]),
        };
        Self { role, content }
    }
}

impl CompletionRequest {
    /// Create a request from domain prompt messages
    pub fn from_messages(messages: &[PromptMessage]) -> Self {
        Self {
            messages: messages.iter().map(CompletionMessage::from).collect(),
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Create a simple single-turn request
    pub fn simple(user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: MessageContent::Text(user_message.into()),
            }],
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Override the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the sampling temperature
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from the completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Model that produced the text
    pub model: String,
    /// Token usage, when the provider reports it
    pub usage: Option<TokenUsage>,
    /// Why generation stopped
    pub finish_reason: Option<String>,
}

/// Token counts reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for completion provider implementations
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    /// Generate a completion for the request
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;

    /// Check if the provider endpoint is reachable
    async fn health_check(&self) -> Result<bool, CompletionError>;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;
}
