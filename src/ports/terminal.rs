// src/ports/terminal.rs
use crate::application::View;
use crate::domain::{FormErrors, Note};
use tracing::instrument;

const TITLE: &str = "Address Notes List";
const DESCRIPTION: &str = "Easily create, update, and delete contact notes with our intuitive \
interface. also for data management and real-time notifications to stay organized and connected!";
const SKELETON_CARDS: usize = 7;

/// Plain-text rendering of the notes screen
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, view: View<'_>) -> String {
        match view {
            View::Failed(message) => format!("Error: {}\n", message),
            View::Loading => self.render_page(&self.render_skeletons()),
            View::Ready([]) => self.render_page("No notes yet.\n"),
            View::Ready(notes) => {
                let cards: Vec<String> = notes.iter().map(|n| self.render_card(n)).collect();
                self.render_page(&cards.join("\n"))
            }
        }
    }

    /// One line per failing field, `<label>: <message>`
    pub fn render_form_errors(&self, errors: &FormErrors) -> String {
        errors
            .iter()
            .map(|(field, message)| format!("{}: {}\n", field.label(), message))
            .collect()
    }

    #[instrument(level = "trace", skip(self), ret)]
    fn render_card(&self, note: &Note) -> String {
        format!(
            "{name}\n  Email: {email}\n  Phone Number: {phone}\n  ID: {id}\n",
            name = note.full_name,
            email = note.email,
            phone = note.phone_number,
            id = note.id,
        )
    }

    fn render_skeletons(&self) -> String {
        let card = "  ░░░░░░░░░░░░░░░░░░░░\n  ░░░░░░░░░░░░░░░\n";
        vec![card; SKELETON_CARDS].join("\n")
    }

    fn render_page(&self, body: &str) -> String {
        format!("{}\n{}\n\n{}", TITLE, DESCRIPTION, body)
    }
}
