// src/domain/error.rs
use std::fmt;
use thiserror::Error;

use crate::domain::FormErrors;

/// Remote operations against the notes collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::List => "Failed to fetch notes",
            Operation::Create => "Failed to add the note",
            Operation::Update => "Failed to update the note",
            Operation::Delete => "Failed to delete the note",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{operation}: {reason}")]
    OperationFailed { operation: Operation, reason: String },
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Invalid note: {0}")]
    InvalidForm(FormErrors),
    #[error("No note form is open")]
    NoFormOpen,
    #[error("Session stopped after an earlier failure: {0}")]
    SessionFailed(String),
}

impl DomainError {
    pub fn operation_failed(operation: Operation, reason: impl Into<String>) -> Self {
        DomainError::OperationFailed {
            operation,
            reason: reason.into(),
        }
    }
}
