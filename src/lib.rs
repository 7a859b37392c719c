// src/lib.rs
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use application::{NoteRepository, NotesClient, Notifier};
use domain::DomainError;
use infrastructure::{Config, HttpNoteRepository};
use ports::{TerminalPresenter, TerminalToaster};
use tracing::{debug, info};

use crate::cli::args::{Args, Command, NoteInput};

pub fn run(args: Args) -> Result<ExitCode> {
    debug!(?args, "Starting contactnotes with arguments");

    // Initialize infrastructure
    let config = match &args.config {
        Some(path) => {
            debug!(?path, "Using provided config path");
            Config::load(path)?
        }
        None => Config::load_or_default(Config::default_path()?)?,
    };
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());
    let repository = HttpNoteRepository::new(&base_url, config.api.timeout())?;

    // Initialize application
    let stderr = std::io::stderr();
    let colored = stderr.is_terminal();
    let mut client = NotesClient::new(repository, TerminalToaster::new(stderr, colored))
        .with_load_delay(config.client.load_delay());

    // Execute use case
    info!(%base_url, "Talking to notes API");
    let presenter = TerminalPresenter::new();
    let mut stdout = std::io::stdout().lock();
    execute(&mut client, &args.command, &presenter, &mut stdout)
}

/// Run one command against a fresh client and write the resulting screen to `out`.
///
/// Every command starts with the initial load. Validation errors and remote
/// failures are rendered and reported as a failing exit code; only output
/// errors are returned as `Err`.
pub fn execute<R, N, W>(
    client: &mut NotesClient<R, N>,
    command: &Command,
    presenter: &TerminalPresenter,
    out: &mut W,
) -> Result<ExitCode>
where
    R: NoteRepository,
    N: Notifier,
    W: Write,
{
    let result = dispatch(client, command);

    let code = match result {
        Ok(()) => {
            match command {
                Command::List { json: true } => {
                    let json = serde_json::to_string_pretty(client.notes())
                        .context("Failed to serialize notes")?;
                    writeln!(out, "{}", json)?;
                }
                _ => write!(out, "{}", presenter.render(client.view()))?,
            }
            ExitCode::SUCCESS
        }
        Err(DomainError::InvalidForm(errors)) => {
            write!(out, "{}", presenter.render_form_errors(&errors))?;
            ExitCode::FAILURE
        }
        Err(e) if client.error().is_some() => {
            debug!(error = %e, "Session failed");
            write!(out, "{}", presenter.render(client.view()))?;
            ExitCode::FAILURE
        }
        Err(e) => {
            writeln!(out, "{}", e)?;
            ExitCode::FAILURE
        }
    };

    out.flush().context("Failed to flush output")?;
    Ok(code)
}

fn dispatch<R: NoteRepository, N: Notifier>(
    client: &mut NotesClient<R, N>,
    command: &Command,
) -> Result<(), DomainError> {
    client.load()?;

    match command {
        Command::List { .. } => Ok(()),
        Command::Add { input } => {
            client.open_add_modal();
            fill_form(client, input);
            client.submit().map(drop)
        }
        Command::Edit { note_id, input } => {
            client.open_edit_modal(note_id)?;
            fill_form(client, input);
            client.submit().map(drop)
        }
        Command::Delete { note_id } => client.delete(note_id),
    }
}

fn fill_form<R: NoteRepository, N: Notifier>(client: &mut NotesClient<R, N>, input: &NoteInput) {
    for (field, value) in input.values() {
        client.set_field(field, value);
    }
}
