//! PDF text extraction

use lopdf::Document;
use tracing::debug;

use crate::error::DocumentError;

/// Extract the text layer of every page, joined with newlines in page order
///
/// A page whose text cannot be decoded contributes an empty segment; only a
/// document that fails to parse as a whole is an error.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, DocumentError> {
    let document =
        Document::load_mem(bytes).map_err(|e| DocumentError::PdfParse(e.to_string()))?;

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    debug!(pages = page_numbers.len(), "extracting PDF text layer");

    let segments: Vec<String> = page_numbers
        .into_iter()
        .map(|number| {
            document
                .extract_text(&[number])
                .map(|text| text.trim_end().to_owned())
                .unwrap_or_default()
        })
        .collect();

    Ok(segments.join("\n"))
}
