// src/application/card_creator.rs
use crate::domain::{AddedCard, DomainError, NewNote};

/// Produces the HTML back-face content for a concept.
pub trait ContentGenerator {
    fn generate(&mut self, concept: &str) -> Result<String, DomainError>;
}

/// The card database the finished note is handed to. Ownership of the note
/// transfers to the store on a successful `add_note`.
pub trait CardStore {
    fn deck_names(&mut self) -> Result<Vec<String>, DomainError>;

    /// Create a deck and return its id.
    fn create_deck(&mut self, name: &str) -> Result<i64, DomainError>;

    /// Add a note and return its id. Duplicate rejection surfaces as an
    /// error, per the note's duplicate options.
    fn add_note(&mut self, note: &NewNote) -> Result<i64, DomainError>;
}

pub struct CardCreator<G: ContentGenerator, S: CardStore> {
    generator: G,
    store: S,
}

impl<G: ContentGenerator, S: CardStore> CardCreator<G, S> {
    pub fn new(generator: G, store: S) -> Self {
        Self { generator, store }
    }

    pub fn deck_names(&mut self) -> Result<Vec<String>, DomainError> {
        self.store.deck_names()
    }

    pub fn create_deck(&mut self, name: &str) -> Result<i64, DomainError> {
        self.store.create_deck(name)
    }

    pub fn generate_content(&mut self, concept: &str) -> Result<String, DomainError> {
        let content = self.generator.generate(concept)?;
        if content.trim().is_empty() {
            return Err(DomainError::Generation(
                "generator returned empty content".to_string(),
            ));
        }
        Ok(content)
    }

    /// File the generated content as a Basic note in the given deck.
    pub fn add_card(
        &mut self,
        deck: &str,
        concept: &str,
        content: &str,
        tags: Vec<String>,
    ) -> Result<AddedCard, DomainError> {
        let note = NewNote::basic(deck, concept, content, tags);
        let note_id = self.store.add_note(&note)?;
        Ok(AddedCard { note_id, note })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{MockGenerator, MockStore};

    #[test]
    fn given_generated_content_when_adding_card_then_note_carries_fields_verbatim() {
        // Arrange
        let generator = MockGenerator::returning("<p>Def</p><i>Example</i>");
        let store = MockStore::builder()
            .with_decks(["Default"])
            .with_add_note_id(1496198395707)
            .build();
        let mut creator = CardCreator::new(generator, store);

        // Act
        let content = creator.generate_content("ubiquitous").expect("should generate");
        let added = creator
            .add_card("Default", "ubiquitous", &content, vec!["vocab".to_string()])
            .expect("should add note");

        // Assert
        assert_eq!(added.note_id, 1496198395707);
        assert_eq!(added.note.fields.front, "ubiquitous");
        assert_eq!(added.note.fields.back, "<p>Def</p><i>Example</i>");
        assert_eq!(added.note.tags, vec!["vocab".to_string()]);
    }

    #[test]
    fn given_empty_generator_output_when_generating_then_returns_error() {
        let generator = MockGenerator::returning("   ");
        let store = MockStore::builder().build();
        let mut creator = CardCreator::new(generator, store);

        let result = creator.generate_content("term");

        assert!(matches!(result, Err(DomainError::Generation(_))));
    }

    #[test]
    fn given_failing_generator_when_generating_then_propagates_error() {
        let generator = MockGenerator::failing("status 503");
        let store = MockStore::builder().build();
        let mut creator = CardCreator::new(generator, store);

        let result = creator.generate_content("term");

        assert!(matches!(result, Err(DomainError::Generation(_))));
    }

    #[test]
    fn given_duplicate_rejection_when_adding_card_then_returns_store_error() {
        let generator = MockGenerator::returning("<p>Def</p>");
        let store = MockStore::builder()
            .with_decks(["Default"])
            .with_add_note_duplicate()
            .build();
        let mut creator = CardCreator::new(generator, store);

        let result = creator.add_card("Default", "term", "<p>Def</p>", vec![]);

        match result {
            Err(DomainError::Store(message)) => assert!(message.contains("duplicate")),
            other => panic!("Expected Store error, got {other:?}"),
        }
    }
}
