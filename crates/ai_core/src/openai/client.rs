//! OpenAI-compatible chat completion client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::CompletionConfig;
use crate::error::CompletionError;
use crate::ports::{
    CompletionEngine, CompletionMessage, CompletionRequest, CompletionResponse, TokenUsage,
};

/// Completion engine speaking the OpenAI chat-completions protocol
///
/// Works against api.openai.com as well as any self-hosted gateway that
/// exposes the same endpoint shape.
#[derive(Debug)]
pub struct OpenAiCompletionEngine {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiCompletionEngine {
    /// Create a new completion engine
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        if config.base_url.trim().is_empty() {
            return Err(CompletionError::Configuration(
                "completion base_url must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| CompletionError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized completion engine"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, CompletionError> {
        Self::new(CompletionConfig::default())
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Attach the bearer token when one is configured
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key_str() {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }
}

/// OpenAI-format chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<CompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// OpenAI-format chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[async_trait]
impl CompletionEngine for OpenAiCompletionEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let model = self.resolve_model(&request).to_string();

        let chat_request = ChatCompletionRequest {
            model: model.clone(),
            messages: request.messages,
            temperature: request.temperature.or(Some(self.config.temperature)),
            max_tokens: request.max_tokens.or(Some(self.config.max_tokens)),
        };

        debug!("Sending chat completion request");

        let response = self
            .authorize(self.client.post(self.api_url("chat/completions")))
            .json(&chat_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Completion request failed");
            return Err(CompletionError::ServerError(format!(
                "Status {status}: {body}"
            )));
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let usage = chat_response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyResponse)?;

        debug!(tokens = ?usage, "Completion finished");

        Ok(CompletionResponse {
            content: choice.message.content,
            model: chat_response.model.unwrap_or(model),
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, CompletionError> {
        let response = self
            .authorize(self.client.get(self.api_url("models")))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) if e.is_connect() => Ok(false),
            Err(e) => Err(CompletionError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_creates_correct_urls() {
        let engine = OpenAiCompletionEngine::with_defaults().unwrap();

        assert_eq!(
            engine.api_url("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(engine.api_url("/models"), "https://api.openai.com/v1/models");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let config = CompletionConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..CompletionConfig::default()
        };
        let engine = OpenAiCompletionEngine::new(config).unwrap();

        assert_eq!(
            engine.api_url("chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = CompletionConfig {
            base_url: "  ".to_string(),
            ..CompletionConfig::default()
        };
        let err = OpenAiCompletionEngine::new(config).unwrap_err();
        assert!(matches!(err, CompletionError::Configuration(_)));
    }

    #[test]
    fn default_model_comes_from_config() {
        let engine = OpenAiCompletionEngine::with_defaults().unwrap();
        assert_eq!(engine.default_model(), "gpt-4o-mini");
    }
}
