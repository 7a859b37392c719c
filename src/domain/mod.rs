// src/domain/mod.rs
pub mod error;
pub mod form;
pub mod note;

pub use error::{DomainError, Operation};
pub use form::{validate, Field, FormErrors};
pub use note::{Note, NoteFields};
