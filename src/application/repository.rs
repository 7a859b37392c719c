// src/application/repository.rs
use crate::domain::{DomainError, Note, NoteFields};

/// Remote notes collection.
///
/// Every failure is reported as `DomainError::OperationFailed`; implementations
/// do not distinguish transport errors from rejected requests.
pub trait NoteRepository {
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError>;

    /// Create a note and return it with its server-assigned id
    fn create_note(&mut self, fields: &NoteFields) -> Result<Note, DomainError>;

    fn update_note(&mut self, id: &str, fields: &NoteFields) -> Result<Note, DomainError>;

    fn delete_note(&mut self, id: &str) -> Result<(), DomainError>;
}
