//! # Vellum Buffer
//!
//! Line-oriented text buffer, cursor, and viewport model.
//!
//! The buffer is an ordered sequence of [`Line`]s, each a growable sequence
//! of character codes. This keeps row access O(1) and makes in-place
//! insertion and deletion by column index direct, at the cost of O(line)
//! edits, which is the right trade for a viewport-sized editor.
//!
//! The buffer never becomes empty: it holds at least one (possibly empty)
//! line from creation to teardown.

mod buffer;
mod cursor;
mod viewport;

pub use buffer::{Line, LineBuffer};
pub use cursor::Cursor;
pub use viewport::Viewport;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("position {row}:{col} is out of bounds")]
    PositionOutOfBounds { row: usize, col: usize },

    #[error("row {0} is out of bounds")]
    RowOutOfBounds(usize),

    #[error("row 0 has no previous line to join")]
    JoinAtFirstRow,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
