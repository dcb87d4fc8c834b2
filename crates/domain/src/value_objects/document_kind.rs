//! Document kind - Routes an inbound attachment to its extraction strategy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attachment formats the pipeline knows how to handle
///
/// Routing is a closed set: anything that is not one of the supported
/// document formats maps to `Unsupported`, which terminates the pipeline
/// with a user-facing rejection before any extraction or provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Portable Document Format (`.pdf`)
    Pdf,
    /// Office Open XML document (`.docx`)
    Docx,
    /// Plain UTF-8 text (`.txt`)
    PlainText,
    /// Any other attachment; rejected before extraction
    Unsupported,
}

impl DocumentKind {
    /// Classify an attachment by its file name (case-insensitive)
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            Self::Pdf
        } else if lower.ends_with(".docx") {
            Self::Docx
        } else if lower.ends_with(".txt") {
            Self::PlainText
        } else {
            Self::Unsupported
        }
    }

    /// Whether an extraction strategy exists for this kind
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Get the display name for this kind
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::PlainText => "TXT",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
