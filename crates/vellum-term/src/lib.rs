//! # Vellum Term
//!
//! The character-grid terminal capability the editor core draws through.
//!
//! The core never touches the terminal directly: it is handed a
//! [`TerminalSurface`] implementation at startup. The production backend is
//! [`CrosstermSurface`]; tests substitute an in-memory fake. Raw mode and the
//! alternate screen are acquired through a guard that restores the terminal
//! on drop, whichever way the session ends.

mod keys;
mod surface;
mod theme;

pub use keys::{Key, KeyPress, Modifiers};
pub use surface::{CrosstermSurface, RawModeGuard, Style, TerminalSurface};
pub use theme::Theme;

/// Re-exported so callers name colors without depending on crossterm.
pub use crossterm::style::Color;

/// Result type for terminal operations
pub type TermResult<T> = Result<T, TermError>;

/// Errors that can occur while driving the terminal.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input stream closed")]
    InputClosed,
}
