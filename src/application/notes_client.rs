// src/application/notes_client.rs
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::{NoteRepository, Notifier, Toast};
use crate::domain::{validate, DomainError, Field, FormErrors, Note, NoteFields};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Modal {
    #[default]
    Closed,
    Add,
    /// Holds the note being edited; the selection lives only as long as the modal.
    Edit(Note),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FormState {
    fields: NoteFields,
    errors: FormErrors,
}

#[derive(Debug, Default)]
struct NotesState {
    notes: Vec<Note>,
    loaded: bool,
    error: Option<String>,
    modal: Modal,
    form: FormState,
}

/// What the screen should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Failed(&'a str),
    Ready(&'a [Note]),
}

/// Owns the cached notes collection and keeps it in step with the remote API.
///
/// Local state only changes after the repository confirms an operation. The
/// first remote failure is written to the error slot and stops the session:
/// every later command is refused with `DomainError::SessionFailed`.
pub struct NotesClient<R: NoteRepository, N: Notifier> {
    repository: R,
    notifier: N,
    load_delay: Duration,
    state: NotesState,
}

impl<R: NoteRepository, N: Notifier> NotesClient<R, N> {
    pub fn new(repository: R, notifier: N) -> Self {
        Self {
            repository,
            notifier,
            load_delay: Duration::ZERO,
            state: NotesState::default(),
        }
    }

    /// Wait this long before the initial fetch
    pub fn with_load_delay(mut self, load_delay: Duration) -> Self {
        self.load_delay = load_delay;
        self
    }

    pub fn load(&mut self) -> Result<(), DomainError> {
        self.ensure_active()?;

        if !self.load_delay.is_zero() {
            debug!(delay_ms = self.load_delay.as_millis() as u64, "Delaying initial load");
            std::thread::sleep(self.load_delay);
        }

        match self.repository.list_notes() {
            Ok(notes) => {
                info!(count = notes.len(), "Loaded notes");
                self.state.notes = notes;
                self.state.loaded = true;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn create(&mut self, fields: NoteFields) -> Result<Note, DomainError> {
        self.ensure_active()?;
        self.check_form(&fields)?;

        match self.repository.create_note(&fields) {
            Ok(note) => {
                info!(note_id = %note.id, "Note added");
                self.state.notes.push(note.clone());
                self.notifier.notify(Toast::Added);
                self.close_modal();
                Ok(note)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn update(&mut self, id: &str, fields: NoteFields) -> Result<Note, DomainError> {
        self.ensure_active()?;
        self.check_form(&fields)?;

        match self.repository.update_note(id, &fields) {
            Ok(updated) => {
                info!(note_id = %updated.id, "Note updated");
                // Matched on the id the server sent back, not the one requested.
                for note in self.state.notes.iter_mut() {
                    if note.id == updated.id {
                        *note = updated.clone();
                    }
                }
                self.notifier.notify(Toast::Updated);
                self.close_modal();
                Ok(updated)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        self.ensure_active()?;

        match self.repository.delete_note(id) {
            Ok(()) => {
                info!(note_id = id, "Note deleted");
                self.state.notes.retain(|note| note.id != id);
                self.notifier.notify(Toast::Deleted);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn open_add_modal(&mut self) {
        self.state.form = FormState::default();
        self.state.modal = Modal::Add;
    }

    pub fn open_edit_modal(&mut self, id: &str) -> Result<(), DomainError> {
        let note = self
            .state
            .notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))?;

        self.state.form = FormState {
            fields: note.fields(),
            errors: FormErrors::default(),
        };
        self.state.modal = Modal::Edit(note);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.state.modal = Modal::Closed;
    }

    /// Change one form value; any error shown for that field goes away.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.form.fields.set(field, value);
        self.state.form.errors.clear(field);
    }

    /// Send the open form: create from the add modal, update from the edit modal.
    pub fn submit(&mut self) -> Result<Note, DomainError> {
        let selected_id = match &self.state.modal {
            Modal::Closed => return Err(DomainError::NoFormOpen),
            Modal::Add => None,
            Modal::Edit(selected) => Some(selected.id.clone()),
        };

        let fields = self.state.form.fields.clone();
        match selected_id {
            Some(id) => self.update(&id, fields),
            None => self.create(fields),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn view(&self) -> View<'_> {
        match (&self.state.error, self.state.loaded) {
            (Some(message), _) => View::Failed(message),
            (None, false) => View::Loading,
            (None, true) => View::Ready(&self.state.notes),
        }
    }

    pub fn form(&self) -> &NoteFields {
        &self.state.form.fields
    }

    pub fn form_errors(&self) -> &FormErrors {
        &self.state.form.errors
    }

    pub fn is_add_modal_open(&self) -> bool {
        self.state.modal == Modal::Add
    }

    pub fn is_edit_modal_open(&self) -> bool {
        matches!(self.state.modal, Modal::Edit(_))
    }

    pub fn selected_note(&self) -> Option<&Note> {
        match &self.state.modal {
            Modal::Edit(note) => Some(note),
            _ => None,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        match &self.state.error {
            Some(message) => Err(DomainError::SessionFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn check_form(&mut self, fields: &NoteFields) -> Result<(), DomainError> {
        let errors = validate(fields);
        self.state.form.errors = errors.clone();
        if errors.is_valid() {
            Ok(())
        } else {
            debug!(%errors, "Form rejected");
            Err(DomainError::InvalidForm(errors))
        }
    }

    fn fail(&mut self, error: DomainError) -> DomainError {
        warn!(%error, "Remote operation failed");
        self.state.error = Some(error.to_string());
        error
    }
}
