// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Field;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the notes API, overrides the config file
    #[arg(short, long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (list, add, edit, or delete)
    #[command(subcommand)]
    pub command: Command,
}

/// Form values given on the command line; omitted fields stay untouched.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    /// Full name of the contact
    #[arg(long, value_name = "NAME")]
    pub full_name: Option<String>,

    /// Email address
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Phone number
    #[arg(long, value_name = "PHONE")]
    pub phone_number: Option<String>,
}

impl NoteInput {
    /// Given values paired with their form field
    pub fn values(&self) -> Vec<(Field, &str)> {
        [
            (Field::FullName, &self.full_name),
            (Field::Email, &self.email),
            (Field::PhoneNumber, &self.phone_number),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all notes
    List {
        /// Output notes as JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Add a new note
    Add {
        #[command(flatten)]
        input: NoteInput,
    },

    /// Edit an existing note; omitted fields keep their current value
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        #[command(flatten)]
        input: NoteInput,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },
}
