//! Inbound document entity

use std::fmt;

use crate::value_objects::DocumentKind;

/// A user-submitted attachment awaiting extraction
///
/// Lives for a single pipeline invocation and is discarded once its text
/// has been extracted.
#[derive(Clone, PartialEq, Eq)]
pub struct InboundDocument {
    /// File name as declared by the transport
    pub file_name: String,
    /// Raw attachment payload
    pub bytes: Vec<u8>,
}

impl InboundDocument {
    /// Create a document from a declared file name and raw payload
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Extraction route for this document
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_file_name(&self.file_name)
    }

    /// Payload size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payload bytes stay out of log output
impl fmt::Debug for InboundDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboundDocument")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
