// src/ports/console.rs
use crate::domain::AddedCard;
use crate::util::text::plain_text;

/// Renders flow output as console text. Kept free of I/O so the exact
/// output is testable.
#[derive(Debug)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_deck_list(&self, decks: &[String]) -> String {
        if decks.is_empty() {
            return "No decks found.".to_string();
        }
        let mut out = String::from("Available decks:\n");
        for name in decks {
            out.push_str(&format!("- {name}\n"));
        }
        out.trim_end().to_string()
    }

    /// Readable rendering of generated content, shown before the note is
    /// submitted. The raw HTML goes on the card untouched.
    pub fn render_preview(&self, content: &str) -> String {
        format!("Generated content:\n{}", plain_text(content))
    }

    pub fn render_added(&self, card: &AddedCard) -> String {
        let note = &card.note;
        format!(
            "Successfully added card to '{deck}' (note id {id}).\n  Front: {front}\n  Back (HTML):\n{back}\n  Tags: {tags}",
            deck = note.deck_name,
            id = card.note_id,
            front = note.fields.front,
            back = note.fields.back,
            tags = if note.tags.is_empty() {
                "none".to_string()
            } else {
                note.tags.join(", ")
            },
        )
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}
