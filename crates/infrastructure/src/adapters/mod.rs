//! Infrastructure adapters implementing application ports

mod completion_adapter;
mod document_adapter;

pub use completion_adapter::CompletionAdapter;
pub use document_adapter::DocumentAdapter;
