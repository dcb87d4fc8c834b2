//! Completion adapter - Implements CompletionPort using ai_core

use std::{fmt, sync::Arc, time::Instant};

use ai_core::{CompletionEngine, CompletionError, CompletionRequest};
use application::{
    error::ApplicationError,
    ports::{CompletionPort, CompletionResult},
};
use async_trait::async_trait;
use domain::PromptMessage;
use tracing::{debug, instrument};

/// Adapter wiring the application's completion port to a completion engine
pub struct CompletionAdapter {
    engine: Arc<dyn CompletionEngine>,
}

impl fmt::Debug for CompletionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionAdapter")
            .field("model", &self.engine.default_model())
            .finish_non_exhaustive()
    }
}

impl CompletionAdapter {
    /// Create a new adapter over the given engine
    pub fn new(engine: Arc<dyn CompletionEngine>) -> Self {
        Self { engine }
    }

    /// Convert ai_core error to application error
    fn map_error(e: CompletionError) -> ApplicationError {
        match e {
            CompletionError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Completion(other.to_string()),
        }
    }
}

#[async_trait]
impl CompletionPort for CompletionAdapter {
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    async fn complete(
        &self,
        messages: Vec<PromptMessage>,
    ) -> Result<CompletionResult, ApplicationError> {
        let start = Instant::now();

        let request = CompletionRequest::from_messages(&messages);
        let response = self
            .engine
            .complete(request)
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = latency_ms,
            "Completion finished"
        );

        Ok(CompletionResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }
}
