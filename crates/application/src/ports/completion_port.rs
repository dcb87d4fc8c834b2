//! Completion port - Interface for the text generation provider

use async_trait::async_trait;
use domain::PromptMessage;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of one completion call
#[derive(Debug, Clone)]
pub struct CompletionResult {
    /// Generated text
    pub content: String,
    /// Model that produced the text
    pub model: String,
    /// Total tokens consumed, when the provider reports them
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Port for text generation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Submit prompt messages and return the generated text
    async fn complete(
        &self,
        messages: Vec<PromptMessage>,
    ) -> Result<CompletionResult, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_healthy(&self) -> bool;
}
