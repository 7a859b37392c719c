// src/application/mod.rs
pub mod notes_client;
pub mod notifier;
pub mod repository;

pub use notes_client::{NotesClient, View};
pub use notifier::{Notifier, Toast};
pub use repository::NoteRepository;
