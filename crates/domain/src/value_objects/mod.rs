//! Value Objects - Immutable, identity-less domain primitives

mod chat_id;
mod document_kind;

pub use chat_id::ChatId;
pub use document_kind::DocumentKind;
