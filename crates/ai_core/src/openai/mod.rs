//! OpenAI-compatible completion backend

mod client;

pub use client::OpenAiCompletionEngine;
