//! The visible window into the buffer.

/// Vertical scroll state plus the terminal grid dimensions.
///
/// `scroll_offset` is the buffer row drawn at screen row 0. The last screen
/// row is reserved for the status line, so `height - 1` rows of content are
/// visible. Invariant maintained by callers: after any cursor move,
/// `row - scroll_offset` lies in `[0, height - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Buffer row drawn at screen row 0
    pub scroll_offset: usize,
    /// Total terminal rows, including the status row
    pub height: usize,
    /// Total terminal columns
    pub width: usize,
}

impl Viewport {
    /// Creates a viewport with the given grid dimensions.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            scroll_offset: 0,
            height,
            width,
        }
    }

    /// Updates the grid dimensions, keeping the scroll offset.
    pub fn resize(&mut self, height: usize, width: usize) {
        self.height = height;
        self.width = width;
    }

    /// Number of rows available for buffer content (everything above the
    /// status line).
    #[inline]
    pub fn content_rows(&self) -> usize {
        self.height.saturating_sub(1)
    }

    /// Adjusts the scroll offset so `row` is visible.
    pub fn follow(&mut self, row: usize) {
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else {
            let rows = self.content_rows();
            if rows > 0 && row >= self.scroll_offset + rows {
                self.scroll_offset = row + 1 - rows;
            }
        }
    }

    /// Pins the scroll offset so the last buffer line sits on the last
    /// content row, with no blank space dangling below end of file.
    pub fn scroll_to_bottom(&mut self, total_lines: usize) {
        self.scroll_offset = (total_lines + 1).saturating_sub(self.height);
    }

    /// Returns the screen row for a buffer row, if it is inside the content
    /// area.
    pub fn screen_row(&self, row: usize) -> Option<usize> {
        let offset = row.checked_sub(self.scroll_offset)?;
        (offset < self.content_rows()).then_some(offset)
    }
}
