//! Port definitions for the application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement them.

mod completion_port;
mod document_port;

#[cfg(test)]
pub use completion_port::MockCompletionPort;
pub use completion_port::{CompletionPort, CompletionResult};
#[cfg(test)]
pub use document_port::MockDocumentPort;
pub use document_port::DocumentPort;
