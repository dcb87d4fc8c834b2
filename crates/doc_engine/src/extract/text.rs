//! Plain-text extraction

use crate::error::DocumentError;

/// Decode raw bytes as UTF-8 text
///
/// Strict decode: invalid byte sequences fail the whole extraction, never
/// partial or replacement-character output.
pub fn extract_plain_text(bytes: &[u8]) -> Result<String, DocumentError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}
