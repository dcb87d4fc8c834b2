//! Document processing errors

use thiserror::Error;

/// Errors that can occur while handling document bytes
#[derive(Debug, Error)]
pub enum DocumentError {
    /// No extraction strategy exists for this attachment kind
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// PDF container could not be parsed
    #[error("PDF parsing failed: {0}")]
    PdfParse(String),

    /// DOCX container could not be parsed
    #[error("DOCX parsing failed: {0}")]
    DocxParse(String),

    /// Plain-text payload is not valid UTF-8
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Image bytes could not be decoded or re-encoded
    #[error("Image processing failed: {0}")]
    ImageDecode(String),

    /// Filing document could not be rendered
    #[error("Filing rendering failed: {0}")]
    Render(String),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
