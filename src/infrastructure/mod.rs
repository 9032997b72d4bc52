// src/infrastructure/mod.rs
pub mod anki_connect;
pub mod gemini;

pub use anki_connect::AnkiConnectClient;
pub use gemini::GeminiClient;
