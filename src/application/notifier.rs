// src/application/notifier.rs

/// Confirmed changes worth telling the user about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    Added,
    Updated,
    Deleted,
}

impl Toast {
    pub fn message(self) -> &'static str {
        match self {
            Toast::Added => "New Note Added Successfully",
            Toast::Updated => "The Note Has Been Updated Successfully",
            Toast::Deleted => "The Note Has Been Deleted Successfully",
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}
