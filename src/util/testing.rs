// src/util/testing.rs

use anyhow::Result;
use std::collections::HashSet;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{NoteRepository, Notifier, Toast};
use crate::domain::{DomainError, Note, NoteFields, Operation};

/// A request the mock repository received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryCall {
    List,
    Create(NoteFields),
    Update(String, NoteFields),
    Delete(String),
}

/// In-memory stand-in for the remote notes collection
///
/// Behaves like a well-formed server: create assigns ids `mock-1`, `mock-2`, ...;
/// update and delete of an unknown id fail. Operations configured with
/// `failing_on` fail unconditionally. Every call is recorded, including failed
/// ones, so tests can assert that nothing was sent.
///
/// # Examples
///
/// ```
/// use contactnotes::util::testing::MockNoteRepository;
/// use contactnotes::domain::{Note, Operation};
///
/// let mock = MockNoteRepository::builder()
///     .with_note(Note {
///         id: "1".to_string(),
///         full_name: "Ada Lovelace".to_string(),
///         email: "ada@example.com".to_string(),
///         phone_number: "555-0100".to_string(),
///     })
///     .failing_on(Operation::Delete)
///     .build();
/// ```
pub struct MockNoteRepository {
    notes: Vec<Note>,
    failures: HashSet<Operation>,
    next_id: u64,
    calls: Vec<RepositoryCall>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    pub fn calls(&self) -> &[RepositoryCall] {
        &self.calls
    }

    /// Notes as the "server" currently holds them
    pub fn stored_notes(&self) -> &[Note] {
        &self.notes
    }

    fn check_failure(&self, operation: Operation) -> Result<(), DomainError> {
        if self.failures.contains(&operation) {
            return Err(DomainError::operation_failed(
                operation,
                "HTTP status server error (500 Internal Server Error)",
            ));
        }
        Ok(())
    }

    fn not_found(operation: Operation) -> DomainError {
        DomainError::operation_failed(operation, "HTTP status client error (404 Not Found)")
    }
}

impl NoteRepository for MockNoteRepository {
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        self.calls.push(RepositoryCall::List);
        self.check_failure(Operation::List)?;
        Ok(self.notes.clone())
    }

    fn create_note(&mut self, fields: &NoteFields) -> Result<Note, DomainError> {
        self.calls.push(RepositoryCall::Create(fields.clone()));
        self.check_failure(Operation::Create)?;

        let note = Note {
            id: format!("mock-{}", self.next_id),
            full_name: fields.full_name.clone(),
            email: fields.email.clone(),
            phone_number: fields.phone_number.clone(),
        };
        self.next_id += 1;
        self.notes.push(note.clone());
        Ok(note)
    }

    fn update_note(&mut self, id: &str, fields: &NoteFields) -> Result<Note, DomainError> {
        self.calls
            .push(RepositoryCall::Update(id.to_string(), fields.clone()));
        self.check_failure(Operation::Update)?;

        let stored = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Self::not_found(Operation::Update))?;
        stored.full_name = fields.full_name.clone();
        stored.email = fields.email.clone();
        stored.phone_number = fields.phone_number.clone();
        Ok(stored.clone())
    }

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        self.calls.push(RepositoryCall::Delete(id.to_string()));
        self.check_failure(Operation::Delete)?;

        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Err(Self::not_found(Operation::Delete));
        }
        Ok(())
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: Vec<Note>,
    failures: HashSet<Operation>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            failures: HashSet::new(),
        }
    }

    /// Add a note the "server" already holds; list order follows insertion order
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Make every call of this operation fail with a server error
    pub fn failing_on(mut self, operation: Operation) -> Self {
        self.failures.insert(operation);
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            notes: self.notes,
            failures: self.failures,
            next_id: 1,
            calls: vec![],
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Notifier that keeps every toast it is given
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Vec<Toast>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "hyper_util", "reqwest", "rustls", "mio", "tower", "axum"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
