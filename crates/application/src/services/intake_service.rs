//! Intake service - Handles the document-to-filing workflow
//!
//! This service orchestrates the complete intake flow:
//! 1. Receive a document or photo from the user
//! 2. Extract its text (or hand the image to the provider directly)
//! 3. Ask the provider for the applicant data found in it
//! 4. Ask the provider to compose the filing from that data
//! 5. Render the filing to a .docx file for delivery

use std::{fmt, path::PathBuf, sync::Arc, time::Instant};

use domain::{GeneratedFiling, InboundDocument};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{CompletionPort, DocumentPort},
    services::prompt_builder::{extraction_prompt, filing_prompt, photo_prompt},
};

/// Outcome of the extraction stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Applicant data the provider found in the document
    Data(String),
    /// The file format has no extraction route
    Unsupported,
}

/// A rendered filing ready for delivery
#[derive(Debug, Clone)]
pub struct PreparedFiling {
    /// Where the rendered document was written
    pub path: PathBuf,
    /// File name to present to the user
    pub file_name: String,
    /// Number of body paragraphs in the filing
    pub paragraph_count: usize,
    /// Total composition time in milliseconds
    pub processing_time_ms: u64,
}

/// Service for turning submitted documents into a court filing
pub struct IntakeService {
    completion_port: Arc<dyn CompletionPort>,
    document_port: Arc<dyn DocumentPort>,
}

impl fmt::Debug for IntakeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeService").finish_non_exhaustive()
    }
}

impl IntakeService {
    /// Create a new intake service
    pub fn new(
        completion_port: Arc<dyn CompletionPort>,
        document_port: Arc<dyn DocumentPort>,
    ) -> Self {
        Self {
            completion_port,
            document_port,
        }
    }

    /// Extract applicant data from a submitted document
    ///
    /// Routes the document by its declared file name. Unsupported formats
    /// are reported as an outcome rather than an error so the caller can
    /// answer the user without touching the provider.
    #[instrument(skip(self, document), fields(
        file_name = %document.file_name,
        size = document.len()
    ))]
    pub async fn extract_from_document(
        &self,
        document: &InboundDocument,
    ) -> Result<ExtractionOutcome, ApplicationError> {
        if !document.kind().is_supported() {
            info!(kind = %document.kind(), "Rejecting unsupported document format");
            return Ok(ExtractionOutcome::Unsupported);
        }

        // Step 1: Pull plain text out of the attachment
        let text = match self.document_port.extract_text(document).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Text extraction failed");
                return Err(e);
            },
        };

        debug!(text_len = text.len(), "Document text extracted");

        // Step 2: Ask the provider for the applicant data
        let result = match self
            .completion_port
            .complete(vec![extraction_prompt(&text)])
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Applicant data extraction failed");
                return Err(e);
            },
        };

        info!(
            model = %result.model,
            latency_ms = result.latency_ms,
            "Applicant data extracted"
        );

        Ok(ExtractionOutcome::Data(result.content))
    }

    /// Extract applicant data from a photographed document
    ///
    /// The image is not parsed locally; it is re-encoded as a data URI and
    /// handed to the provider for recognition.
    #[instrument(skip(self, image_bytes), fields(size = image_bytes.len()))]
    pub async fn extract_from_photo(
        &self,
        image_bytes: &[u8],
    ) -> Result<String, ApplicationError> {
        let data_uri = match self.document_port.image_data_uri(image_bytes).await {
            Ok(uri) => uri,
            Err(e) => {
                warn!(error = %e, "Image re-encoding failed");
                return Err(e);
            },
        };

        let result = match self
            .completion_port
            .complete(vec![photo_prompt(&data_uri)])
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Photo recognition failed");
                return Err(e);
            },
        };

        info!(
            model = %result.model,
            latency_ms = result.latency_ms,
            "Photo recognized"
        );

        Ok(result.content)
    }

    /// Compose the filing from extracted applicant data and render it
    #[instrument(skip(self, applicant_data), fields(data_len = applicant_data.len()))]
    pub async fn compose_filing(
        &self,
        applicant_data: &str,
    ) -> Result<PreparedFiling, ApplicationError> {
        let start = Instant::now();

        let result = match self
            .completion_port
            .complete(vec![filing_prompt(applicant_data)])
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Filing composition failed");
                return Err(e);
            },
        };

        let filing = GeneratedFiling::from_draft(&result.content);
        if filing.is_empty() {
            debug!("Provider returned an empty draft; rendering heading only");
        }

        let path = match self.document_port.render_filing(&filing).await {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Filing rendering failed");
                return Err(e);
            },
        };

        let file_name = path.file_name().map_or_else(
            || "заявление.docx".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        #[allow(clippy::cast_possible_truncation)]
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            file_name = %file_name,
            paragraphs = filing.paragraphs.len(),
            processing_time_ms = processing_time_ms,
            "Filing composed"
        );

        Ok(PreparedFiling {
            path,
            file_name,
            paragraph_count: filing.paragraphs.len(),
            processing_time_ms,
        })
    }

    /// Check if the completion provider is available
    pub async fn is_available(&self) -> bool {
        self.completion_port.is_healthy().await
    }
}
