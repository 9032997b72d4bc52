// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::application::{CardCreator, CardStore, ContentGenerator};
use crate::cli::{Args, Command, Interaction, TerminalPrompt};
use crate::constants::FAVORITE_DECK;
use crate::domain::{normalize_tags, AddedCard};
use crate::infrastructure::{AnkiConnectClient, GeminiClient};
use crate::ports::ConsolePresenter;

/// How the add flow ended. Declining to create a missing deck is a
/// cancellation, not an error.
#[derive(Debug)]
pub enum Outcome {
    Added(AddedCard),
    Cancelled,
}

/// Answers prefilled from the command line; anything left `None` is asked
/// for interactively.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub concept: Option<String>,
    pub deck: Option<String>,
    pub tags: Option<String>,
}

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting ankiadd with arguments");

    match args.command {
        Command::Decks => run_decks(&args.anki_url),
        Command::Add {
            ref concept,
            ref deck,
            ref tags,
        } => {
            let options = AddOptions {
                concept: concept.clone(),
                deck: deck.clone(),
                tags: tags.clone(),
            };
            run_add(&args, options)
        }
    }
}

fn run_decks(anki_url: &str) -> Result<()> {
    let mut store = AnkiConnectClient::new(anki_url);
    let decks = store.deck_names()?;
    println!("{}", ConsolePresenter::new().render_deck_list(&decks));
    Ok(())
}

fn run_add(args: &Args, options: AddOptions) -> Result<()> {
    // Resolving the key first means a missing credential aborts before any
    // store call is made.
    let generator = GeminiClient::from_env(&args.model)?;
    let store = AnkiConnectClient::new(&args.anki_url);
    let mut creator = CardCreator::new(generator, store);
    let mut prompt = TerminalPrompt::new();

    match add_flow(&mut creator, &mut prompt, &options)? {
        Outcome::Added(card) => {
            println!("\n{}", ConsolePresenter::new().render_added(&card));
        }
        Outcome::Cancelled => println!("Card creation cancelled."),
    }
    Ok(())
}

/// The linear add flow: list decks, resolve the target deck (creating it
/// after confirmation when missing), obtain the concept, generate content,
/// collect tags, submit the note. Each step is a precondition for the next;
/// side effects that already happened (deck creation) persist when a later
/// step fails.
pub fn add_flow<G, S, P>(
    creator: &mut CardCreator<G, S>,
    prompt: &mut P,
    options: &AddOptions,
) -> Result<Outcome>
where
    G: ContentGenerator,
    S: CardStore,
    P: Interaction,
{
    let presenter = ConsolePresenter::new();

    let decks = creator.deck_names()?;
    println!("{}", presenter.render_deck_list(&decks));

    let deck = match &options.deck {
        Some(deck) => deck.clone(),
        None => prompt.choose_deck(&decks, FAVORITE_DECK)?,
    };

    if !decks.contains(&deck) {
        if !prompt.confirm_create_deck(&deck)? {
            return Ok(Outcome::Cancelled);
        }
        creator.create_deck(&deck)?;
        info!(deck = %deck, "Deck created");
        println!("Deck '{deck}' created.");
    }

    let concept = match &options.concept {
        Some(concept) => concept.clone(),
        None => prompt.concept()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Generating definition and example for '{concept}'..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let generated = creator.generate_content(&concept);
    spinner.finish_and_clear();
    let content = generated?;

    println!("{}", presenter.render_preview(&content));

    let tag_input = match &options.tags {
        Some(tags) => tags.clone(),
        None => prompt.tags()?,
    };
    let tags = normalize_tags(&tag_input);

    let card = creator.add_card(&deck, &concept, &content, tags)?;
    Ok(Outcome::Added(card))
}

#[cfg(test)]
mod tests {
    use crate::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
