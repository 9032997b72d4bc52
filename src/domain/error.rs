// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("GEMINI_API_KEY environment variable not set. Get a key from Google AI Studio and export it")]
    MissingApiKey,
    #[error("Content generation failed: {0}")]
    Generation(String),
    #[error("AnkiConnect request failed: {0}")]
    Store(String),
}
