//! Domain entities - The objects flowing through the filing pipeline

mod document;
mod filing;
mod prompt;

pub use document::InboundDocument;
pub use filing::{FILING_HEADING, GeneratedFiling};
pub use prompt::{MessageRole, PromptContent, PromptMessage};
