//! The line buffer: an ordered sequence of editable lines.

use std::path::Path;

use crate::{BufferError, BufferResult};

/// One editable row of character codes.
///
/// Stored as a `Vec<char>` rather than a `String` so that column indices map
/// directly to display cells and single-character edits need no byte-offset
/// arithmetic. Multi-unit grapheme clusters are out of scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    chars: Vec<char>,
}

impl Line {
    /// Creates an empty line.
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// Returns the number of characters in the line.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the line holds no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the characters of the line.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// The full ordered document as a sequence of [`Line`]s.
///
/// Invariant: the buffer holds at least one line at all times. Index 0 is
/// the first line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl LineBuffer {
    /// Creates a buffer holding one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }

    // ==================== Loading & Saving ====================

    /// Builds a buffer from text content.
    ///
    /// Content is split on `'\n'`; the terminator itself is discarded. A
    /// trailing empty segment produced by a final terminator is not
    /// materialized as an extra line, while a terminator-less trailing
    /// fragment is kept.
    pub fn from_str(content: &str) -> Self {
        let mut lines: Vec<Line> = content.split('\n').map(Line::from).collect();
        if lines.len() > 1 && lines.last().is_some_and(Line::is_empty) {
            lines.pop();
        }
        Self { lines }
    }

    /// Loads a buffer from a file, always producing something editable.
    ///
    /// A missing file yields a single empty line. Any other read failure
    /// yields a single line describing the problem, so the session can still
    /// render and the user can still save elsewhere.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "file not found, starting empty");
                Self::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "load failed, degraded buffer");
                Self {
                    lines: vec![Line::from(
                        format!("Error: unable to open {}: {}", path.display(), e).as_str(),
                    )],
                }
            }
        }
    }

    /// Writes every line back to `path`, each followed by a terminator.
    ///
    /// The last line also receives a terminator, so a file loaded without a
    /// final newline gains one on the first save.
    pub fn save_to(&self, path: impl AsRef<Path>) -> BufferResult<()> {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        std::fs::write(path.as_ref(), out)?;
        Ok(())
    }

    // ==================== Measurements ====================

    /// Returns the number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: the buffer holds at least one line.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns a line by row index.
    pub fn line(&self, row: usize) -> BufferResult<&Line> {
        self.lines.get(row).ok_or(BufferError::RowOutOfBounds(row))
    }

    /// Returns the character length of a line.
    pub fn line_len(&self, row: usize) -> BufferResult<usize> {
        Ok(self.line(row)?.len())
    }

    // ==================== Mutations ====================

    /// Inserts one character into `row` at position `col`.
    ///
    /// `col` may equal the line length (append).
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> BufferResult<()> {
        let line = self
            .lines
            .get_mut(row)
            .ok_or(BufferError::RowOutOfBounds(row))?;
        if col > line.chars.len() {
            return Err(BufferError::PositionOutOfBounds { row, col });
        }
        line.chars.insert(col, ch);
        Ok(())
    }

    /// Removes and returns the character at `(row, col)`.
    pub fn delete_char(&mut self, row: usize, col: usize) -> BufferResult<char> {
        let line = self
            .lines
            .get_mut(row)
            .ok_or(BufferError::RowOutOfBounds(row))?;
        if col >= line.chars.len() {
            return Err(BufferError::PositionOutOfBounds { row, col });
        }
        Ok(line.chars.remove(col))
    }

    /// Truncates `row` to `[0, col)` and inserts a new line holding the
    /// remainder at `row + 1`.
    pub fn split_line(&mut self, row: usize, col: usize) -> BufferResult<()> {
        let line = self
            .lines
            .get_mut(row)
            .ok_or(BufferError::RowOutOfBounds(row))?;
        if col > line.chars.len() {
            return Err(BufferError::PositionOutOfBounds { row, col });
        }
        let rest = line.chars.split_off(col);
        self.lines.insert(row + 1, Line { chars: rest });
        Ok(())
    }

    /// Appends `row` onto the line above it and removes `row`.
    ///
    /// Returns the previous line's length before the join, which is where a
    /// cursor sitting at the join point belongs.
    pub fn join_with_previous(&mut self, row: usize) -> BufferResult<usize> {
        if row == 0 {
            return Err(BufferError::JoinAtFirstRow);
        }
        if row >= self.lines.len() {
            return Err(BufferError::RowOutOfBounds(row));
        }
        let removed = self.lines.remove(row);
        let prev = &mut self.lines[row - 1];
        let join_col = prev.chars.len();
        prev.chars.extend(removed.chars);
        Ok(join_col)
    }

    /// Returns up to `count` lines starting at `start`, joined with a single
    /// `'\n'` per line boundary. This is the text handed to the lexer each
    /// frame.
    pub fn window_text(&self, start: usize, count: usize) -> String {
        let end = start.saturating_add(count).min(self.lines.len());
        if start >= end {
            return String::new();
        }
        let mut out = String::new();
        for (i, line) in self.lines[start..end].iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.to_string());
        }
        out
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
