//! Application services

mod intake_service;
mod prompt_builder;

pub use intake_service::{ExtractionOutcome, IntakeService, PreparedFiling};
pub use prompt_builder::{EXTRACTION_TEXT_LIMIT, extraction_prompt, filing_prompt, photo_prompt};
