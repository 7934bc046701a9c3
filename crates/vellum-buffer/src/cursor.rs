//! Cursor type for text navigation.

use serde::{Deserialize, Serialize};

/// A logical position in the buffer: `(row, col)`, both 0-indexed.
///
/// `row` indexes into the buffer; `col` indexes into the addressed line and
/// may equal the line length, meaning "after the last character": a valid
/// insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Row (line index, 0-indexed)
    pub row: usize,
    /// Column (character index within the line, 0-indexed)
    pub col: usize,
}

impl Cursor {
    /// Creates a cursor at a position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cursor at the start of the document.
    pub const ZERO: Cursor = Cursor { row: 0, col: 0 };

    /// Moves one row up, if not already on the first row.
    ///
    /// Returns true if the cursor moved.
    pub fn move_up(&mut self) -> bool {
        if self.row > 0 {
            self.row -= 1;
            true
        } else {
            false
        }
    }

    /// Moves one row down, bounded by `last_row`.
    ///
    /// Returns true if the cursor moved.
    pub fn move_down(&mut self, last_row: usize) -> bool {
        if self.row < last_row {
            self.row += 1;
            true
        } else {
            false
        }
    }

    /// Moves one column left, stopping at 0. No wrap to the previous line.
    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    /// Moves one column right, stopping at `line_len`. No wrap to the next
    /// line.
    pub fn move_right(&mut self, line_len: usize) {
        if self.col < line_len {
            self.col += 1;
        }
    }

    /// Clamps the column into the valid range of a line of `line_len`
    /// characters. Callers apply this after vertical moves and after every
    /// structural edit.
    pub fn clamp_col(&mut self, line_len: usize) {
        self.col = self.col.min(line_len);
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Row is shown 1-indexed, column 0-indexed, matching the status line.
        write!(f, "Row {}, Col {}", self.row + 1, self.col)
    }
}
