// src/util/testing.rs

use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::{filter::filter_fn, fmt, prelude::*, EnvFilter};

use crate::application::{CardStore, ContentGenerator};
use crate::cli::Interaction;
use crate::domain::{DomainError, NewNote};

/// Shared, clonable record of the calls a mock received. Handles stay valid
/// after the mock has been moved into a `CardCreator`, which is what lets
/// tests assert that e.g. `addNote` was never issued.
#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// True if the action was called, with any argument.
    pub fn called(&self, action: &str) -> bool {
        let prefix = format!("{action}:");
        self.0
            .borrow()
            .iter()
            .any(|e| e == action || e.starts_with(&prefix))
    }
}

/// Notes a `MockStore` received via `add_note`, successful or not.
#[derive(Clone, Default)]
pub struct SubmittedNotes(Rc<RefCell<Vec<NewNote>>>);

impl SubmittedNotes {
    fn push(&self, note: NewNote) {
        self.0.borrow_mut().push(note);
    }

    pub fn all(&self) -> Vec<NewNote> {
        self.0.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

enum GeneratorBehavior {
    Content(String),
    Failure(String),
}

/// Scripted `ContentGenerator` for tests.
pub struct MockGenerator {
    behavior: GeneratorBehavior,
    log: CallLog,
}

impl MockGenerator {
    pub fn returning(html: &str) -> Self {
        Self {
            behavior: GeneratorBehavior::Content(html.to_string()),
            log: CallLog::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behavior: GeneratorBehavior::Failure(message.to_string()),
            log: CallLog::default(),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl ContentGenerator for MockGenerator {
    fn generate(&mut self, concept: &str) -> Result<String, DomainError> {
        self.log.record(format!("generate:{concept}"));
        match &self.behavior {
            GeneratorBehavior::Content(html) => Ok(html.clone()),
            GeneratorBehavior::Failure(message) => {
                Err(DomainError::Generation(message.clone()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MockStore
// ---------------------------------------------------------------------------

enum AddNoteBehavior {
    Id(i64),
    Duplicate,
    Failure(String),
}

/// Configurable `CardStore` for tests, built via `MockStore::builder()`.
pub struct MockStore {
    decks: Vec<String>,
    create_deck_fails: bool,
    add_note: AddNoteBehavior,
    log: CallLog,
    submitted: SubmittedNotes,
}

impl MockStore {
    pub fn builder() -> MockStoreBuilder {
        MockStoreBuilder::new()
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn submitted(&self) -> SubmittedNotes {
        self.submitted.clone()
    }
}

impl CardStore for MockStore {
    fn deck_names(&mut self) -> Result<Vec<String>, DomainError> {
        self.log.record("deckNames");
        Ok(self.decks.clone())
    }

    fn create_deck(&mut self, name: &str) -> Result<i64, DomainError> {
        self.log.record(format!("createDeck:{name}"));
        if self.create_deck_fails {
            return Err(DomainError::Store(format!("could not create deck '{name}'")));
        }
        self.decks.push(name.to_string());
        Ok(self.decks.len() as i64)
    }

    fn add_note(&mut self, note: &NewNote) -> Result<i64, DomainError> {
        self.log.record(format!("addNote:{}", note.fields.front));
        self.submitted.push(note.clone());
        match &self.add_note {
            AddNoteBehavior::Id(id) => Ok(*id),
            AddNoteBehavior::Duplicate => Err(DomainError::Store(
                "cannot create note because it is a duplicate".to_string(),
            )),
            AddNoteBehavior::Failure(message) => Err(DomainError::Store(message.clone())),
        }
    }
}

pub struct MockStoreBuilder {
    decks: Vec<String>,
    create_deck_fails: bool,
    add_note: AddNoteBehavior,
}

impl MockStoreBuilder {
    pub fn new() -> Self {
        Self {
            decks: vec![],
            create_deck_fails: false,
            add_note: AddNoteBehavior::Id(1),
        }
    }

    pub fn with_decks<I, T>(mut self, decks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.decks = decks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_create_deck_failure(mut self) -> Self {
        self.create_deck_fails = true;
        self
    }

    pub fn with_add_note_id(mut self, id: i64) -> Self {
        self.add_note = AddNoteBehavior::Id(id);
        self
    }

    /// Make `add_note` reject every note as a within-deck duplicate.
    pub fn with_add_note_duplicate(mut self) -> Self {
        self.add_note = AddNoteBehavior::Duplicate;
        self
    }

    pub fn with_add_note_failure(mut self, message: &str) -> Self {
        self.add_note = AddNoteBehavior::Failure(message.to_string());
        self
    }

    pub fn build(self) -> MockStore {
        MockStore {
            decks: self.decks,
            create_deck_fails: self.create_deck_fails,
            add_note: self.add_note,
            log: CallLog::default(),
            submitted: SubmittedNotes::default(),
        }
    }
}

impl Default for MockStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// ScriptedPrompt
// ---------------------------------------------------------------------------

/// Canned answers for the add flow's interactive questions.
pub struct ScriptedPrompt {
    deck: Option<String>,
    confirm_create: bool,
    concept: String,
    tags: String,
}

impl ScriptedPrompt {
    /// Defaults: pick the favorite deck, accept creation, concept "term",
    /// no tags.
    pub fn new() -> Self {
        Self {
            deck: None,
            confirm_create: true,
            concept: "term".to_string(),
            tags: String::new(),
        }
    }

    pub fn choosing_deck(mut self, deck: &str) -> Self {
        self.deck = Some(deck.to_string());
        self
    }

    pub fn declining_creation(mut self) -> Self {
        self.confirm_create = false;
        self
    }

    pub fn with_concept(mut self, concept: &str) -> Self {
        self.concept = concept.to_string();
        self
    }

    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = tags.to_string();
        self
    }
}

impl Default for ScriptedPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for ScriptedPrompt {
    fn choose_deck(&mut self, _existing: &[String], favorite: &str) -> Result<String> {
        Ok(self.deck.clone().unwrap_or_else(|| favorite.to_string()))
    }

    fn confirm_create_deck(&mut self, _deck: &str) -> Result<bool> {
        Ok(self.confirm_create)
    }

    fn concept(&mut self) -> Result<String> {
        Ok(self.concept.clone())
    }

    fn tags(&mut self) -> Result<String> {
        Ok(self.tags.clone())
    }
}

// ---------------------------------------------------------------------------
// Test environment setup
// ---------------------------------------------------------------------------

pub fn init_test_setup() -> Result<()> {
    setup_test_logging();
    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Filter noisy modules out of test logs
    let noisy_modules = ["reqwest", "hyper", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {e}");
        });
    }
}
