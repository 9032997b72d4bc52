// src/cli/prompt.rs
use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

/// User-facing questions of the add flow. The flow talks to this trait so
/// tests can script answers without a terminal.
pub trait Interaction {
    /// Resolve the target deck name: the favorite, one of the existing
    /// decks, or a freshly entered name.
    fn choose_deck(&mut self, existing: &[String], favorite: &str) -> Result<String>;

    fn confirm_create_deck(&mut self, deck: &str) -> Result<bool>;

    fn concept(&mut self) -> Result<String>;

    /// Raw comma-separated tag input; may be empty.
    fn tags(&mut self) -> Result<String>;
}

/// `dialoguer`-backed prompts for interactive runs.
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for TerminalPrompt {
    fn choose_deck(&mut self, existing: &[String], favorite: &str) -> Result<String> {
        // One selection covers favorite, existing decks and free-text entry,
        // so no answer can leave the deck name unresolved.
        let mut items: Vec<String> = vec![format!("{favorite} (favorite)")];
        items.extend(existing.iter().filter(|d| d.as_str() != favorite).cloned());
        items.push("Enter another deck name".to_string());

        let selection = Select::new()
            .with_prompt("Add the card to which deck?")
            .items(&items)
            .default(0)
            .interact()?;

        if selection == 0 {
            Ok(favorite.to_string())
        } else if selection == items.len() - 1 {
            let name: String = Input::new()
                .with_prompt("Deck name")
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("deck name must not be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            Ok(name.trim().to_string())
        } else {
            Ok(items[selection].clone())
        }
    }

    fn confirm_create_deck(&mut self, deck: &str) -> Result<bool> {
        let create = Confirm::new()
            .with_prompt(format!("Deck '{deck}' does not exist. Create it?"))
            .default(false)
            .interact()?;
        Ok(create)
    }

    fn concept(&mut self) -> Result<String> {
        let concept: String = Input::new()
            .with_prompt("Word or concept for the flashcard")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("please enter a term")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(concept.trim().to_string())
    }

    fn tags(&mut self) -> Result<String> {
        let tags: String = Input::new()
            .with_prompt("Tags for the card (comma-separated, optional)")
            .allow_empty(true)
            .interact_text()?;
        Ok(tags)
    }
}
