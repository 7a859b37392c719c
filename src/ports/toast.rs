// src/ports/toast.rs
use std::io::Write;

use tracing::warn;

use crate::application::{Notifier, Toast};

// Background colours of the original toasts: green, amber, red.
fn ansi_background(toast: Toast) -> &'static str {
    match toast {
        Toast::Added => "\x1b[42;97m",
        Toast::Updated => "\x1b[43;97m",
        Toast::Deleted => "\x1b[41;97m",
    }
}

const ANSI_RESET: &str = "\x1b[0m";

/// Writes each toast as a single line, optionally coloured
pub struct TerminalToaster<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> TerminalToaster<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalToaster<W> {
    fn notify(&mut self, toast: Toast) {
        let line = if self.colored {
            format!(" {}{}{} ", ansi_background(toast), toast.message(), ANSI_RESET)
        } else {
            format!("[{}]", toast.message())
        };

        // A toast that cannot be shown must not undo a confirmed change.
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!(error = %e, "Failed to write toast");
        }
    }
}
