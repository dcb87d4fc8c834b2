//! Domain layer for Bankrot
//!
//! Contains the core vocabulary of the filing pipeline: inbound documents,
//! prompt messages, the generated filing, and the value objects used to
//! route and address them. This layer has no I/O and no external services.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
