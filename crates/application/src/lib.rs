//! Application layer - Use cases and orchestration
//!
//! Contains the document intake pipeline, the prompt construction rules,
//! and the port definitions implemented by infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
