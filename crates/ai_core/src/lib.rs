//! AI Core - Completion provider client
//!
//! Talks to any OpenAI-compatible chat-completions endpoint. The pipeline
//! uses it twice per user flow: once to extract applicant data from
//! document text, once to compose the filing draft from that data.
//! Requests may carry an inline image as a data URI for the photograph
//! flow.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::CompletionConfig;
pub use error::CompletionError;
pub use openai::OpenAiCompletionEngine;
pub use ports::{
    CompletionEngine, CompletionMessage, CompletionRequest, CompletionResponse, MessageContent,
    TokenUsage,
};
