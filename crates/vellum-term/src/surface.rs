//! The terminal surface capability and its crossterm backend.

use std::io::{Stdout, Write, stdout};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event};
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{ExecutableCommand, QueueableCommand};

use crate::TermResult;
use crate::keys::KeyPress;

/// Display attributes for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    /// `None` means the terminal's default background.
    pub bg: Option<Color>,
}

impl Style {
    /// A foreground color on the default background.
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: color,
            bg: None,
        }
    }

    /// Sets a background color.
    pub const fn on(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }
}

/// A character-grid terminal the renderer paints onto.
///
/// Writes outside the current grid are silently dropped, never an error;
/// this tolerates resize races between `size` and the paint that follows.
/// `read_key` blocks until one usable key press arrives.
pub trait TerminalSurface {
    /// Current grid size as `(rows, cols)`.
    fn size(&mut self) -> TermResult<(usize, usize)>;

    /// Clears the whole grid.
    fn clear(&mut self) -> TermResult<()>;

    /// Writes one character with a style at `(row, col)`.
    fn put(&mut self, row: usize, col: usize, ch: char, style: Style) -> TermResult<()>;

    /// Moves the hardware cursor to `(row, col)`.
    fn move_cursor(&mut self, row: usize, col: usize) -> TermResult<()>;

    /// Makes all queued writes visible.
    fn flush(&mut self) -> TermResult<()>;

    /// Blocks until one key press arrives.
    fn read_key(&mut self) -> TermResult<KeyPress>;
}

/// Puts the terminal into raw mode on the alternate screen, and restores it
/// on drop no matter how the session ends.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Acquires raw mode and switches to the alternate screen.
    pub fn acquire() -> TermResult<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Restoration failures are unreportable at this point.
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// The production surface: crossterm over stdout.
pub struct CrosstermSurface {
    out: Stdout,
    rows: usize,
    cols: usize,
    _guard: RawModeGuard,
}

impl CrosstermSurface {
    /// Acquires the terminal and queries its initial size.
    pub fn new() -> TermResult<Self> {
        let guard = RawModeGuard::acquire()?;
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out: stdout(),
            rows: rows as usize,
            cols: cols as usize,
            _guard: guard,
        })
    }
}

impl TerminalSurface for CrosstermSurface {
    fn size(&mut self) -> TermResult<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        self.rows = rows as usize;
        self.cols = cols as usize;
        Ok((self.rows, self.cols))
    }

    fn clear(&mut self) -> TermResult<()> {
        self.out.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn put(&mut self, row: usize, col: usize, ch: char, style: Style) -> TermResult<()> {
        if row >= self.rows || col >= self.cols {
            return Ok(());
        }
        self.out.queue(MoveTo(col as u16, row as u16))?;
        self.out.queue(SetForegroundColor(style.fg))?;
        self.out
            .queue(SetBackgroundColor(style.bg.unwrap_or(Color::Reset)))?;
        self.out.queue(Print(ch))?;
        Ok(())
    }

    fn move_cursor(&mut self, row: usize, col: usize) -> TermResult<()> {
        self.out.queue(MoveTo(col as u16, row as u16))?;
        Ok(())
    }

    fn flush(&mut self) -> TermResult<()> {
        self.out.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> TermResult<KeyPress> {
        loop {
            match event::read()? {
                Event::Key(event) => {
                    if let Some(press) = KeyPress::from_event(&event) {
                        return Ok(press);
                    }
                }
                Event::Resize(cols, rows) => {
                    self.rows = rows as usize;
                    self.cols = cols as usize;
                }
                _ => {}
            }
        }
    }
}
