//! Document port - Interface for document parsing and rendering

use std::path::PathBuf;

use async_trait::async_trait;
use domain::{GeneratedFiling, InboundDocument};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for document operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentPort: Send + Sync {
    /// Extract plain text from a supported document
    async fn extract_text(&self, document: &InboundDocument) -> Result<String, ApplicationError>;

    /// Re-encode image bytes as a base64 data URI
    async fn image_data_uri(&self, bytes: &[u8]) -> Result<String, ApplicationError>;

    /// Render the filing to a .docx file and return its path
    async fn render_filing(&self, filing: &GeneratedFiling) -> Result<PathBuf, ApplicationError>;
}
