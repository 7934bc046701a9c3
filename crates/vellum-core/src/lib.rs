//! # Vellum Core
//!
//! The editor itself: one session owning a line buffer, a cursor, and a
//! viewport, driven by a strictly sequential loop of
//! render → read one key → mutate.
//!
//! The terminal and the lexer are injected capabilities
//! ([`vellum_term::TerminalSurface`], [`vellum_syntax::Lexer`]), so every
//! piece of editing and rendering logic here runs headless under test.

pub mod command;
pub mod config;
pub mod render;
pub mod session;

pub use command::Command;
pub use config::Config;
pub use render::Renderer;
pub use session::EditorSession;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("buffer error: {0}")]
    Buffer(#[from] vellum_buffer::BufferError),

    #[error("terminal error: {0}")]
    Term(#[from] vellum_term::TermError),
}
