// src/domain/note.rs
use serde::Serialize;

use crate::constants::NOTE_MODEL;

/// A note ready for submission to the card store. The serde representation
/// is exactly the AnkiConnect `addNote` note payload, so this struct is the
/// single source of truth for the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    pub options: NoteOptions,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteFields {
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: String,
}

impl NewNote {
    /// Build a Basic-model note. Duplicates are refused within the target
    /// deck; the store enforces this, we only declare it.
    pub fn basic(deck_name: &str, front: &str, back: &str, tags: Vec<String>) -> Self {
        Self {
            deck_name: deck_name.to_string(),
            model_name: NOTE_MODEL.to_string(),
            fields: NoteFields {
                front: front.to_string(),
                back: back.to_string(),
            },
            options: NoteOptions {
                allow_duplicate: false,
                duplicate_scope: "deck".to_string(),
            },
            tags,
        }
    }
}

/// A note the store accepted, together with the id it assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedCard {
    pub note_id: i64,
    pub note: NewNote,
}

/// Split comma-separated tag input into clean tags: trimmed, empties
/// dropped, duplicates removed, first-seen order kept.
pub fn normalize_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
