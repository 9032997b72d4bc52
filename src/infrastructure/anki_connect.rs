// src/infrastructure/anki_connect.rs
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::CardStore;
use crate::constants::ANKI_CONNECT_VERSION;
use crate::domain::{DomainError, NewNote};

/// Client for the AnkiConnect control port. Every operation goes through the
/// same versioned `{action, version, params}` envelope.
pub struct AnkiConnectClient {
    http: Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct RequestEnvelope<'a, P: Serialize> {
    action: &'a str,
    version: u32,
    params: P,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

impl AnkiConnectClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    /// Send one action and return the envelope's `result`. A non-empty
    /// `error` field fails the call regardless of HTTP status.
    #[instrument(level = "debug", skip(self, params))]
    fn invoke<P: Serialize>(&self, action: &str, params: P) -> Result<Value, DomainError> {
        let envelope = RequestEnvelope {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };

        let response = self.http.post(&self.url).json(&envelope).send().map_err(|e| {
            DomainError::Store(format!(
                "cannot reach AnkiConnect at {}: {e}. Is Anki running with the AnkiConnect add-on installed?",
                self.url
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Store(format!(
                "{action} returned status {status}"
            )));
        }

        let body: ResponseEnvelope = response
            .json()
            .map_err(|e| DomainError::Store(format!("undecodable {action} response: {e}")))?;

        if let Some(error) = body.error.filter(|e| !e.is_empty()) {
            return Err(DomainError::Store(error));
        }

        debug!(action, "AnkiConnect call succeeded");
        Ok(body.result)
    }
}

impl CardStore for AnkiConnectClient {
    fn deck_names(&mut self) -> Result<Vec<String>, DomainError> {
        let result = self.invoke("deckNames", serde_json::json!({}))?;
        serde_json::from_value(result)
            .map_err(|e| DomainError::Store(format!("unexpected deckNames result: {e}")))
    }

    fn create_deck(&mut self, name: &str) -> Result<i64, DomainError> {
        let result = self.invoke("createDeck", serde_json::json!({ "deck": name }))?;
        result
            .as_i64()
            .ok_or_else(|| DomainError::Store(format!("deck '{name}' was not created")))
    }

    fn add_note(&mut self, note: &NewNote) -> Result<i64, DomainError> {
        let result = self.invoke("addNote", serde_json::json!({ "note": note }))?;
        result
            .as_i64()
            .ok_or_else(|| DomainError::Store("note was not added".to_string()))
    }
}
