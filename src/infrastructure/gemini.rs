// src/infrastructure/gemini.rs
use std::env;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ContentGenerator;
use crate::constants::{API_KEY_ENV, GENERATIVE_API_BASE};
use crate::domain::DomainError;

/// Client for the generative language `generateContent` endpoint.
///
/// The key and model are explicit constructor inputs; only `from_env` touches
/// the environment. Other providers could be slotted in behind the same
/// `ContentGenerator` trait, but none is.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, GENERATIVE_API_BASE)
    }

    /// Point the client at a different endpoint, e.g. a local test server.
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Resolve the API key from the environment. An absent or blank key is a
    /// hard precondition failure for any generation.
    pub fn from_env(model: &str) -> Result<Self, DomainError> {
        match env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key, model)),
            _ => Err(DomainError::MissingApiKey),
        }
    }
}

impl ContentGenerator for GeminiClient {
    #[instrument(level = "debug", skip(self))]
    fn generate(&mut self, concept: &str) -> Result<String, DomainError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateRequest::for_prompt(build_prompt(concept));

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            // without_url: the request URL carries the API key
            .map_err(|e| DomainError::Generation(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| DomainError::Generation(format!("failed to read response: {e}")))?;
        debug!(%status, bytes = body.len(), "generateContent response");

        if !status.is_success() {
            return Err(DomainError::Generation(format!("status {status}: {body}")));
        }

        let envelope: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::Generation(format!("undecodable response: {e}")))?;

        extract_text(envelope).ok_or_else(|| {
            DomainError::Generation("no text content in response".to_string())
        })
    }
}

/// The fixed card-authoring instruction sent for every concept.
fn build_prompt(concept: &str) -> String {
    format!(
        "You are an assistant that creates educational flashcards. \
         For the term '{concept}', provide a clear, concise definition and a simple, \
         illustrative example sentence and/or model/instance. \
         If the term contains an indication of a foreign language, remove the name of \
         the language from the card title. \
         If the definition involves multiple distinct concepts or types (like different \
         types of engines), please describe each in a separate HTML paragraph (`<p>`). \
         Format the entire response using HTML tags. \
         The definition should come first, followed by the example. \
         Ensure the example is italicized using `<i>` tags. \
         Do not include any JSON formatting, just the complete HTML string. \
         If the provided concept is in quotation marks, cite the quotation so the \
         source can be remembered accurately."
    )
}

// Request body: {contents: [{parts: [{text}]}], generationConfig: {response_mime_type}}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
}

impl GenerateRequest {
    fn for_prompt(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "text/plain".to_string(),
            },
        }
    }
}

// Response envelope: only the candidates[0].content.parts[0].text path is
// consumed; everything else is ignored.

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// First part of the first candidate, passed through untouched.
fn extract_text(envelope: GenerateResponse) -> Option<String> {
    envelope
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}
