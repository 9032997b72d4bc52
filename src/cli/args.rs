// src/cli/args.rs
use clap::{Parser, Subcommand};

use crate::constants::{ANKI_CONNECT_URL, DEFAULT_GENERATION_MODEL};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// AnkiConnect endpoint URL
    #[arg(long, value_name = "URL", default_value = ANKI_CONNECT_URL, global = true)]
    pub anki_url: String,

    /// Generation model identifier
    #[arg(short, long, value_name = "MODEL", default_value = DEFAULT_GENERATION_MODEL, global = true)]
    pub model: String,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (add or decks)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a flashcard for a term and add it to Anki
    Add {
        /// Term to define (prompted for when omitted)
        #[arg(value_name = "CONCEPT")]
        concept: Option<String>,

        /// Target deck (skips the deck prompt)
        #[arg(short, long, value_name = "DECK")]
        deck: Option<String>,

        /// Comma-separated tags (skips the tag prompt)
        #[arg(short, long, value_name = "TAGS")]
        tags: Option<String>,
    },

    /// List decks known to Anki
    Decks,
}
