//! DOCX text extraction

use docx_rs::{DocumentChild, ParagraphChild, RunChild, read_docx};
use tracing::debug;

use crate::error::DocumentError;

/// Extract paragraph text in document order, joined with newlines
///
/// Every paragraph contributes exactly one segment, including paragraphs
/// with no text at all.
pub fn extract_docx(bytes: &[u8]) -> Result<String, DocumentError> {
    let docx = read_docx(bytes).map_err(|e| DocumentError::DocxParse(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut segment = String::new();
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(text) = run_child {
                            segment.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(segment);
        }
    }

    debug!(paragraphs = paragraphs.len(), "extracted DOCX paragraphs");
    Ok(paragraphs.join("\n"))
}
