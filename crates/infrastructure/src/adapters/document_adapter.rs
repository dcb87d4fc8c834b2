//! Document adapter - Implements DocumentPort using doc_engine

use std::path::PathBuf;

use application::{error::ApplicationError, ports::DocumentPort};
use async_trait::async_trait;
use doc_engine::{DocumentError, FilingConfig};
use domain::{GeneratedFiling, InboundDocument};
use tracing::instrument;

/// Adapter wiring the application's document port to the document engine
///
/// Parsing and rendering are synchronous CPU work, so every call is moved
/// onto the blocking thread pool.
#[derive(Debug, Clone)]
pub struct DocumentAdapter {
    filing_config: FilingConfig,
}

impl DocumentAdapter {
    /// Create a new adapter writing filings per the given configuration
    pub const fn new(filing_config: FilingConfig) -> Self {
        Self { filing_config }
    }

    /// Convert doc_engine error to application error
    fn map_error(e: DocumentError) -> ApplicationError {
        ApplicationError::Document(e.to_string())
    }
}

#[async_trait]
impl DocumentPort for DocumentAdapter {
    #[instrument(skip(self, document), fields(file_name = %document.file_name))]
    async fn extract_text(&self, document: &InboundDocument) -> Result<String, ApplicationError> {
        let kind = document.kind();
        let bytes = document.bytes.clone();

        tokio::task::spawn_blocking(move || doc_engine::extract_text(kind, &bytes))
            .await
            .map_err(|e| ApplicationError::Internal(format!("extraction task failed: {e}")))?
            .map_err(Self::map_error)
    }

    async fn image_data_uri(&self, bytes: &[u8]) -> Result<String, ApplicationError> {
        let bytes = bytes.to_vec();

        tokio::task::spawn_blocking(move || doc_engine::to_data_uri(&bytes))
            .await
            .map_err(|e| ApplicationError::Internal(format!("encoding task failed: {e}")))?
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, filing), fields(paragraphs = filing.paragraphs.len()))]
    async fn render_filing(&self, filing: &GeneratedFiling) -> Result<PathBuf, ApplicationError> {
        let filing = filing.clone();
        let config = self.filing_config.clone();

        tokio::task::spawn_blocking(move || doc_engine::render_filing(&filing, &config))
            .await
            .map_err(|e| ApplicationError::Internal(format!("render task failed: {e}")))?
            .map_err(Self::map_error)
    }
}
