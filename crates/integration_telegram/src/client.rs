//! Telegram Bot API client

use std::time::Duration;

use domain::ChatId;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument, warn};

use crate::error::TelegramError;
use crate::types::{
    ApiResponse, FileInfo, GetFileParams, GetUpdatesParams, Message, SendMessageParams,
    TelegramClientConfig, Update,
};

/// Extra headroom on top of the long-poll timeout before the HTTP request
/// itself is abandoned
const POLL_TIMEOUT_MARGIN_SECS: u64 = 10;

/// Client for the Telegram Bot API
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    config: TelegramClientConfig,
}

impl TelegramClient {
    /// Create a new Telegram client
    pub fn new(config: TelegramClientConfig) -> Result<Self, TelegramError> {
        if config.token.is_empty() {
            return Err(TelegramError::config("bot token is required"));
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// Build the URL for a Bot API method
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.token,
            method
        )
    }

    /// Build the download URL for a file path returned by `getFile`
    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.token,
            file_path
        )
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    /// Poll for new updates
    ///
    /// Blocks server-side for up to `timeout_secs`. Pass the highest seen
    /// `update_id` plus one as `offset` to acknowledge processed updates.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };

        let response = self
            .client
            .post(self.method_url("getUpdates"))
            .timeout(Duration::from_secs(timeout_secs + POLL_TIMEOUT_MARGIN_SECS))
            .json(&params)
            .send()
            .await?;

        // The Bot API reports failures inside the envelope, not as bare
        // HTTP status codes
        let envelope: ApiResponse<Vec<Update>> = response.json().await?;
        unwrap_envelope(envelope)
    }

    /// Resolve a file identifier into a downloadable path
    #[instrument(skip(self))]
    pub async fn get_file(&self, file_id: &str) -> Result<FileInfo, TelegramError> {
        let params = GetFileParams { file_id };

        let response = self
            .client
            .post(self.method_url("getFile"))
            .timeout(self.request_timeout())
            .json(&params)
            .send()
            .await?;

        let envelope: ApiResponse<FileInfo> = response.json().await?;
        unwrap_envelope(envelope)
    }

    /// Download the file behind an attachment identifier
    ///
    /// Combines `getFile` with the file endpoint fetch.
    #[instrument(skip(self))]
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, TelegramError> {
        let info = self.get_file(file_id).await?;
        let file_path = info
            .file_path
            .ok_or_else(|| TelegramError::MissingFilePath(file_id.to_string()))?;

        let response = self
            .client
            .get(self.file_url(&file_path))
            .timeout(self.request_timeout())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "File download failed");
            return Err(TelegramError::api(
                i32::from(status.as_u16()),
                "file download failed",
            ));
        }

        let bytes = response.bytes().await?;
        debug!(size = bytes.len(), "File downloaded");
        Ok(bytes.to_vec())
    }

    /// Send a plain text message
    #[instrument(skip(self, text), fields(chat_id = %chat_id))]
    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<Message, TelegramError> {
        let params = SendMessageParams {
            chat_id: chat_id.value(),
            text,
        };

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .timeout(self.request_timeout())
            .json(&params)
            .send()
            .await?;

        let envelope: ApiResponse<Message> = response.json().await?;
        unwrap_envelope(envelope)
    }

    /// Send a document from an in-memory payload
    #[instrument(skip(self, bytes), fields(chat_id = %chat_id, file_name = %file_name, size = bytes.len()))]
    pub async fn send_document(
        &self,
        chat_id: ChatId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Message, TelegramError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new()
            .text("chat_id", chat_id.value().to_string())
            .part("document", part);

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .timeout(self.request_timeout())
            .multipart(form)
            .send()
            .await?;

        let envelope: ApiResponse<Message> = response.json().await?;
        unwrap_envelope(envelope)
    }
}

/// Unwrap the Bot API envelope into its payload or an error
fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, TelegramError> {
    match (envelope.ok, envelope.result) {
        (true, Some(result)) => Ok(result),
        (ok, _) => Err(TelegramError::Api {
            code: envelope.error_code.unwrap_or(0),
            message: envelope.description.unwrap_or_else(|| {
                if ok {
                    "response envelope carried no result".to_string()
                } else {
                    "unknown error".to_string()
                }
            }),
        }),
    }
}
