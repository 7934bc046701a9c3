//! Painting the visible window and the status line.

use vellum_buffer::{Cursor, Viewport};
use vellum_syntax::Token;
use vellum_term::{TerminalSurface, Theme};

use crate::CoreResult;

/// Maps the frame's token stream onto the terminal grid.
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    /// Creates a renderer with a color theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Paints one frame: content rows, status row, hardware cursor.
    pub fn draw<S: TerminalSurface>(
        &self,
        surface: &mut S,
        viewport: Viewport,
        tokens: &[Token],
        status: &str,
        cursor: Cursor,
    ) -> CoreResult<()> {
        surface.clear()?;
        self.paint_content(surface, viewport, tokens)?;
        self.paint_status(surface, viewport, status)?;

        // The blinking cursor never leaves the content area, even
        // transiently during a resize.
        if let Some(screen_row) = viewport.screen_row(cursor.row) {
            let col = cursor.col.min(viewport.width.saturating_sub(1));
            surface.move_cursor(screen_row, col)?;
        }

        surface.flush()?;
        Ok(())
    }

    /// Walks the token stream once with a virtual `(y, x)` write head.
    ///
    /// Line breaks advance the head; anything landing outside the content
    /// area is dropped per cell. Once the head leaves the last content row
    /// the remaining tokens cannot produce visible cells, so the walk stops.
    fn paint_content<S: TerminalSurface>(
        &self,
        surface: &mut S,
        viewport: Viewport,
        tokens: &[Token],
    ) -> CoreResult<()> {
        let rows = viewport.content_rows();
        if rows == 0 {
            return Ok(());
        }
        let col_limit = viewport.width.saturating_sub(1);

        let mut y = 0usize;
        let mut x = 0usize;
        'tokens: for token in tokens {
            let style = self.theme.style_for(token.category);
            for ch in token.text.chars() {
                if ch == '\n' {
                    y += 1;
                    x = 0;
                    if y >= rows {
                        break 'tokens;
                    }
                } else {
                    if x < col_limit {
                        surface.put(y, x, ch, style)?;
                    }
                    x += 1;
                }
            }
        }
        Ok(())
    }

    /// Paints the status string onto the last grid row.
    fn paint_status<S: TerminalSurface>(
        &self,
        surface: &mut S,
        viewport: Viewport,
        status: &str,
    ) -> CoreResult<()> {
        if viewport.height == 0 {
            return Ok(());
        }
        let row = viewport.height - 1;
        let limit = viewport.width.saturating_sub(1);
        for (col, ch) in status.chars().take(limit).enumerate() {
            surface.put(row, col, ch, self.theme.status)?;
        }
        Ok(())
    }
}

/// Builds the status line: descriptive field left, cursor position right,
/// space-padded to exactly `width` when it fits.
///
/// On a terminal too narrow for both fields the padding clamps to zero and
/// the paint boundary truncates the rest; composing never fails.
pub fn compose_status(
    filename: &str,
    line_count: usize,
    modified: bool,
    note: Option<&str>,
    cursor: Cursor,
    width: usize,
) -> String {
    let mut left = format!(
        "{} - {} lines - {}",
        filename,
        line_count,
        if modified { "modified" } else { "saved" }
    );
    if let Some(note) = note {
        left.push_str(" - ");
        left.push_str(note);
    }
    let right = format!("{} ", cursor);

    let pad = width.saturating_sub(left.chars().count() + right.chars().count());
    let mut status = left;
    status.extend(std::iter::repeat(' ').take(pad));
    status.push_str(&right);
    status
}
