//! Generated filing entity

use serde::{Deserialize, Serialize};

/// Fixed heading rendered at the top of every filing document
pub const FILING_HEADING: &str = "Заявление о признании гражданина банкротом";

/// A drafted filing ready for rendering
///
/// Derived from provider output by splitting on line breaks, trimming each
/// line and discarding the ones left empty. Paragraph order follows the
/// draft. The draft text is untrusted free text; nothing beyond the line
/// split is ever parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFiling {
    /// Document heading
    pub heading: String,
    /// Body paragraphs, one per surviving draft line
    pub paragraphs: Vec<String>,
}

impl GeneratedFiling {
    /// Build a filing from free-form draft text
    #[must_use]
    pub fn from_draft(draft: &str) -> Self {
        let paragraphs = draft
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self {
            heading: FILING_HEADING.to_owned(),
            paragraphs,
        }
    }

    /// Whether the draft produced any body paragraphs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}
