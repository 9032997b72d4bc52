// src/constants.rs
//
// Application-wide constants shared across the cli, application and
// infrastructure layers.

/// Default AnkiConnect endpoint. AnkiConnect binds a loopback HTTP control
/// port; override with `--anki-url` (e.g. for tests or a remapped port).
///
/// Used in: `cli/args.rs`, `infrastructure/anki_connect.rs`
pub const ANKI_CONNECT_URL: &str = "http://localhost:8765";

/// AnkiConnect envelope version sent with every request.
///
/// Used in: `infrastructure/anki_connect.rs`
pub const ANKI_CONNECT_VERSION: u32 = 6;

/// Base URL of the Google generative language API.
///
/// Used in: `infrastructure/gemini.rs`
pub const GENERATIVE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model. The free tier has been generous with this one;
/// override with `--model` when it stops being so.
///
/// Used in: `cli/args.rs`
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash";

/// Environment variable holding the generative-service API key.
///
/// Used in: `infrastructure/gemini.rs`
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Deck offered first in the deck prompt.
///
/// Used in: `lib.rs`
pub const FAVORITE_DECK: &str = "AI_Adder";

/// Anki note model every card is filed under. Must exist in the target
/// collection and support HTML fields.
///
/// Used in: `domain/note.rs`
pub const NOTE_MODEL: &str = "Basic";
