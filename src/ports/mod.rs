// src/ports/mod.rs
pub mod terminal;
pub mod toast;

pub use terminal::TerminalPresenter;
pub use toast::TerminalToaster;
