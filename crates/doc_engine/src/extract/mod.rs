//! Text extraction strategies
//!
//! One strategy per supported attachment kind, each total over its input:
//! a malformed container fails the whole extraction, but a page or
//! paragraph without text contributes an empty segment rather than an
//! error.

mod docx;
mod pdf;
mod text;

pub use docx::extract_docx;
pub use pdf::extract_pdf;
pub use text::extract_plain_text;

use domain::DocumentKind;
use tracing::instrument;

use crate::error::DocumentError;

/// Extract plain text from document bytes using the strategy for `kind`
///
/// `Unsupported` never reaches this router in the normal flow; callers
/// short-circuit with a user-facing rejection first. It still maps to an
/// error here so the routing stays total.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Pdf => extract_pdf(bytes),
        DocumentKind::Docx => extract_docx(bytes),
        DocumentKind::PlainText => extract_plain_text(bytes),
        DocumentKind::Unsupported => {
            Err(DocumentError::UnsupportedFormat(kind.to_string()))
        },
    }
}
