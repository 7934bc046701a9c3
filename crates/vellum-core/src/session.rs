//! The editor session: state, run loop, and input dispatch.

use std::path::PathBuf;

use vellum_buffer::{Cursor, LineBuffer, Viewport};
use vellum_syntax::Lexer;
use vellum_term::{KeyPress, TerminalSurface, Theme};

use crate::command::Command;
use crate::render::{Renderer, compose_status};
use crate::CoreResult;

/// One editing session over one buffer.
///
/// Owns the buffer, cursor, and viewport, and drives the loop:
/// render → blocking read of one key → mutate. Strictly sequential; the
/// input read is the only suspension point.
pub struct EditorSession<S: TerminalSurface> {
    surface: S,
    lexer: Box<dyn Lexer>,
    renderer: Renderer,
    buffer: LineBuffer,
    cursor: Cursor,
    viewport: Viewport,
    path: Option<PathBuf>,
    /// Incremented on every mutating edit, reset only by a successful save.
    /// Drives the modified/saved status word, nothing else.
    edit_count: u64,
    /// Pending status-line note from a failed save.
    save_note: Option<String>,
}

impl<S: TerminalSurface> EditorSession<S> {
    /// Opens a session on `path`, or on a scratch buffer when `path` is
    /// `None`. Load failures degrade into an editable buffer rather than
    /// failing the session.
    pub fn new(
        surface: S,
        lexer: Box<dyn Lexer>,
        theme: Theme,
        path: Option<PathBuf>,
    ) -> CoreResult<Self> {
        let buffer = match &path {
            Some(p) => LineBuffer::load(p),
            None => LineBuffer::new(),
        };
        Self::with_buffer(surface, lexer, theme, buffer, path)
    }

    /// Opens a session on an existing buffer.
    pub fn with_buffer(
        mut surface: S,
        lexer: Box<dyn Lexer>,
        theme: Theme,
        buffer: LineBuffer,
        path: Option<PathBuf>,
    ) -> CoreResult<Self> {
        let (rows, cols) = surface.size()?;
        Ok(Self {
            surface,
            lexer,
            renderer: Renderer::new(theme),
            buffer,
            cursor: Cursor::ZERO,
            viewport: Viewport::new(rows, cols),
            path,
            edit_count: 0,
            save_note: None,
        })
    }

    /// Runs the session until the quit command arrives.
    pub fn run(&mut self) -> CoreResult<()> {
        tracing::info!(lines = self.buffer.len(), "session started");
        loop {
            self.render_frame()?;
            let press = self.surface.read_key()?;
            if !self.dispatch(press)? {
                break;
            }
        }
        tracing::info!("session ended");
        Ok(())
    }

    /// Renders one frame: re-reads the grid size, tokenizes the visible
    /// window, and paints content, status, and cursor.
    pub fn render_frame(&mut self) -> CoreResult<()> {
        let (rows, cols) = self.surface.size()?;
        self.viewport.resize(rows, cols);

        let window = self
            .buffer
            .window_text(self.viewport.scroll_offset, self.viewport.content_rows());
        let tokens = self.lexer.tokenize(&window);

        let status = compose_status(
            self.display_name(),
            self.buffer.len(),
            self.edit_count > 0,
            self.save_note.as_deref(),
            self.cursor,
            self.viewport.width,
        );

        self.renderer
            .draw(&mut self.surface, self.viewport, &tokens, &status, self.cursor)
    }

    /// Consumes one key press. Returns false when the session should stop.
    pub fn dispatch(&mut self, press: KeyPress) -> CoreResult<bool> {
        match Command::from_key(&press) {
            Some(command) => {
                tracing::trace!(command = command.display_name(), "dispatch");
                self.apply(command)
            }
            None => Ok(true),
        }
    }

    /// Applies one command. Returns false when the session should stop.
    pub fn apply(&mut self, command: Command) -> CoreResult<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Save => self.save()?,
            Command::DeleteBackward => self.delete_backward()?,
            Command::MoveUp => self.move_up()?,
            Command::MoveDown => self.move_down()?,
            Command::MoveLeft => self.cursor.move_left(),
            Command::MoveRight => {
                let len = self.buffer.line_len(self.cursor.row)?;
                self.cursor.move_right(len);
            }
            Command::InsertNewline => self.insert_newline()?,
            Command::InsertChar(c) => self.insert_char(c)?,
        }
        Ok(true)
    }

    // ==================== Motion ====================

    fn move_up(&mut self) -> CoreResult<()> {
        if self.cursor.move_up() {
            if self.cursor.row < self.viewport.scroll_offset {
                self.viewport.scroll_offset -= 1;
            }
            let len = self.buffer.line_len(self.cursor.row)?;
            self.cursor.clamp_col(len);
        }
        Ok(())
    }

    fn move_down(&mut self) -> CoreResult<()> {
        let last_row = self.buffer.len() - 1;
        if self.cursor.move_down(last_row) {
            let rows = self.viewport.content_rows();
            if rows > 0 && self.cursor.row >= self.viewport.scroll_offset + rows {
                self.viewport.scroll_offset += 1;
            }
            let len = self.buffer.line_len(self.cursor.row)?;
            self.cursor.clamp_col(len);
        } else {
            // Already on the last row: pin the scroll so no blank space
            // dangles below end of file.
            self.viewport.scroll_to_bottom(self.buffer.len());
        }
        Ok(())
    }

    // ==================== Editing ====================

    fn delete_backward(&mut self) -> CoreResult<()> {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            self.buffer.delete_char(self.cursor.row, self.cursor.col)?;
            self.edit_count += 1;
        } else if self.cursor.row > 0 {
            let join_col = self.buffer.join_with_previous(self.cursor.row)?;
            self.cursor.row -= 1;
            self.cursor.col = join_col;
            self.viewport.follow(self.cursor.row);
            self.edit_count += 1;
        }
        // At (0, 0) there is nothing to delete: a true no-op.
        Ok(())
    }

    fn insert_newline(&mut self) -> CoreResult<()> {
        self.buffer.split_line(self.cursor.row, self.cursor.col)?;
        self.cursor.row += 1;
        self.cursor.col = 0;
        self.viewport.follow(self.cursor.row);
        self.edit_count += 1;
        Ok(())
    }

    fn insert_char(&mut self, c: char) -> CoreResult<()> {
        self.buffer.insert_char(self.cursor.row, self.cursor.col, c)?;
        self.cursor.col += 1;
        self.edit_count += 1;
        Ok(())
    }

    /// Persists the buffer. Failures are reported on the status line and the
    /// session keeps running; without a file path this is a no-op.
    fn save(&mut self) -> CoreResult<()> {
        let Some(path) = &self.path else {
            tracing::debug!("no file path, save skipped");
            return Ok(());
        };
        match self.buffer.save_to(path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "buffer saved");
                self.edit_count = 0;
                self.save_note = None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "save failed");
                self.save_note = Some(format!("save failed: {e}"));
            }
        }
        Ok(())
    }

    // ==================== State Queries ====================

    fn display_name(&self) -> &str {
        self.path
            .as_deref()
            .and_then(|p| p.to_str())
            .unwrap_or("[scratch]")
    }

    /// The buffer under edit.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current viewport state.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Edits since the last successful save.
    pub fn edit_count(&self) -> u64 {
        self.edit_count
    }

    /// The surface, for inspection in headless tests.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use vellum_syntax::RuleLexer;
    use vellum_term::{Key, Style, TermError, TermResult};

    /// In-memory surface: records cells, cursor moves, and replays a queue
    /// of scripted key presses.
    struct FakeSurface {
        rows: usize,
        cols: usize,
        cells: Vec<Vec<char>>,
        styles: Vec<Vec<Option<Style>>>,
        cursor: Option<(usize, usize)>,
        keys: VecDeque<KeyPress>,
    }

    impl FakeSurface {
        fn new(rows: usize, cols: usize) -> Self {
            Self {
                rows,
                cols,
                cells: vec![vec![' '; cols]; rows],
                styles: vec![vec![None; cols]; rows],
                cursor: None,
                keys: VecDeque::new(),
            }
        }

        fn with_keys(rows: usize, cols: usize, keys: &[KeyPress]) -> Self {
            let mut surface = Self::new(rows, cols);
            surface.keys = keys.iter().copied().collect();
            surface
        }

        fn row_text(&self, row: usize) -> String {
            self.cells[row].iter().collect::<String>().trim_end().to_string()
        }
    }

    impl TerminalSurface for FakeSurface {
        fn size(&mut self) -> TermResult<(usize, usize)> {
            Ok((self.rows, self.cols))
        }

        fn clear(&mut self) -> TermResult<()> {
            for row in &mut self.cells {
                row.fill(' ');
            }
            for row in &mut self.styles {
                row.fill(None);
            }
            Ok(())
        }

        fn put(&mut self, row: usize, col: usize, ch: char, style: Style) -> TermResult<()> {
            if row < self.rows && col < self.cols {
                self.cells[row][col] = ch;
                self.styles[row][col] = Some(style);
            }
            Ok(())
        }

        fn move_cursor(&mut self, row: usize, col: usize) -> TermResult<()> {
            self.cursor = Some((row, col));
            Ok(())
        }

        fn flush(&mut self) -> TermResult<()> {
            Ok(())
        }

        fn read_key(&mut self) -> TermResult<KeyPress> {
            self.keys.pop_front().ok_or(TermError::InputClosed)
        }
    }

    fn session(text: &str, rows: usize, cols: usize) -> EditorSession<FakeSurface> {
        EditorSession::with_buffer(
            FakeSurface::new(rows, cols),
            Box::new(RuleLexer::plain()),
            Theme::dark(),
            LineBuffer::from_str(text),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_insert_sequence_builds_line_in_order() {
        let mut s = session("", 10, 40);
        for (n, c) in "hello".chars().enumerate() {
            s.apply(Command::InsertChar(c)).unwrap();
            assert_eq!(s.cursor().col, n + 1);
        }
        assert_eq!(s.buffer().line(0).unwrap().to_string(), "hello");
        assert_eq!(s.edit_count(), 5);
    }

    #[test]
    fn test_enter_splits_at_cursor() {
        let mut s = session("hello world", 10, 40);
        for _ in 0..5 {
            s.apply(Command::MoveRight).unwrap();
        }
        s.apply(Command::InsertNewline).unwrap();
        assert_eq!(s.buffer().line(0).unwrap().to_string(), "hello");
        assert_eq!(s.buffer().line(1).unwrap().to_string(), " world");
        assert_eq!(s.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_backspace_deletes_left_of_cursor() {
        let mut s = session("abc", 10, 40);
        s.apply(Command::MoveRight).unwrap();
        s.apply(Command::MoveRight).unwrap();
        s.apply(Command::DeleteBackward).unwrap();
        assert_eq!(s.buffer().line(0).unwrap().to_string(), "ac");
        assert_eq!(s.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_backspace_at_origin_is_a_no_op() {
        let mut s = session("abc", 10, 40);
        s.apply(Command::DeleteBackward).unwrap();
        assert_eq!(s.buffer().line(0).unwrap().to_string(), "abc");
        assert_eq!(s.cursor(), Cursor::ZERO);
        assert_eq!(s.edit_count(), 0);
    }

    #[test]
    fn test_three_line_scenario() {
        // Load "abc\ndef\nghi", move down twice, backspace at (2, 0).
        let mut s = session("abc\ndef\nghi", 10, 40);
        assert_eq!(s.buffer().len(), 3);

        s.apply(Command::MoveDown).unwrap();
        s.apply(Command::MoveDown).unwrap();
        assert_eq!(s.cursor().row, 2);

        s.apply(Command::DeleteBackward).unwrap();
        assert_eq!(s.buffer().len(), 2);
        assert_eq!(s.buffer().line(0).unwrap().to_string(), "abc");
        assert_eq!(s.buffer().line(1).unwrap().to_string(), "defghi");
        assert_eq!(s.cursor(), Cursor::new(1, 3));
    }

    #[test]
    fn test_vertical_move_clamps_column_to_shorter_line() {
        let mut s = session("abcdef\nxy\nlonger", 10, 40);
        for _ in 0..6 {
            s.apply(Command::MoveRight).unwrap();
        }
        s.apply(Command::MoveDown).unwrap();
        assert_eq!(s.cursor(), Cursor::new(1, 2));
        s.apply(Command::MoveDown).unwrap();
        assert_eq!(s.cursor(), Cursor::new(2, 2));
    }

    #[test]
    fn test_viewport_invariant_under_motion() {
        let text = (0..50).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut s = session(&text, 8, 40); // 7 content rows

        let moves = [
            Command::MoveDown,
            Command::MoveDown,
            Command::MoveDown,
            Command::MoveUp,
            Command::MoveDown,
        ];
        for step in 0..200 {
            s.apply(moves[step % moves.len()]).unwrap();
            let row = s.cursor().row;
            let vp = s.viewport();
            assert!(vp.scroll_offset <= row, "step {step}");
            assert!(row < vp.scroll_offset + vp.content_rows(), "step {step}");
        }
    }

    #[test]
    fn test_down_at_last_row_pins_scroll() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut s = session(&text, 8, 40);
        for _ in 0..30 {
            s.apply(Command::MoveDown).unwrap();
        }
        assert_eq!(s.cursor().row, 19);
        // 20 lines, 8 grid rows: max useful scroll is 20 - 8 + 1.
        assert_eq!(s.viewport().scroll_offset, 13);
    }

    #[test]
    fn test_render_paints_visible_lines_and_status() {
        let mut s = session("abc\ndef\nghi", 4, 50); // 3 content rows
        s.render_frame().unwrap();

        assert_eq!(s.surface().row_text(0), "abc");
        assert_eq!(s.surface().row_text(1), "def");
        assert_eq!(s.surface().row_text(2), "ghi");

        let status = s.surface().row_text(3);
        assert!(status.starts_with("[scratch] - 3 lines - saved"));
        assert!(status.contains("Row 1, Col 0"));
        assert_eq!(s.surface().cursor, Some((0, 0)));
    }

    #[test]
    fn test_render_scrolled_window() {
        let text = (0..10).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        let mut s = session(&text, 4, 30);
        for _ in 0..5 {
            s.apply(Command::MoveDown).unwrap();
        }
        s.render_frame().unwrap();

        let vp = s.viewport();
        assert_eq!(vp.scroll_offset, 3);
        assert_eq!(s.surface().row_text(0), "line3");
        assert_eq!(s.surface().row_text(2), "line5");
        assert_eq!(s.surface().cursor, Some((2, 0)));
    }

    #[test]
    fn test_render_drops_cells_past_the_right_edge() {
        let mut s = session("0123456789", 3, 6);
        s.render_frame().unwrap();
        // Columns [0, width-1) only; the rest is dropped silently.
        assert_eq!(s.surface().row_text(0), "01234");
    }

    #[test]
    fn test_render_stops_at_the_status_row() {
        let text = (0..30).map(|i| format!("row{i}")).collect::<Vec<_>>().join("\n");
        let mut s = session(&text, 4, 30);
        s.render_frame().unwrap();
        // Rows 0..3 are content, row 3 is status; nothing from the buffer
        // may leak into it.
        assert!(s.surface().row_text(3).starts_with("[scratch]"));
    }

    #[test]
    fn test_modified_flag_tracks_edits_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        std::fs::write(&path, "abc\n").unwrap();

        let mut s = EditorSession::new(
            FakeSurface::new(10, 40),
            Box::new(RuleLexer::plain()),
            Theme::dark(),
            Some(path.clone()),
        )
        .unwrap();

        s.apply(Command::InsertChar('x')).unwrap();
        assert_eq!(s.edit_count(), 1);

        s.apply(Command::Save).unwrap();
        assert_eq!(s.edit_count(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "xabc\n");
    }

    #[test]
    fn test_failed_save_reports_and_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        // A directory path: writing to it fails on every platform.
        let mut s = EditorSession::new(
            FakeSurface::new(4, 60),
            Box::new(RuleLexer::plain()),
            Theme::dark(),
            Some(dir.path().to_path_buf()),
        )
        .unwrap();

        s.apply(Command::InsertChar('x')).unwrap();
        let keep_going = s.apply(Command::Save).unwrap();
        assert!(keep_going);
        assert_eq!(s.edit_count(), 1);

        s.render_frame().unwrap();
        assert!(s.surface().row_text(3).contains("save failed"));
    }

    #[test]
    fn test_scratch_save_is_a_no_op() {
        let mut s = session("abc", 10, 40);
        s.apply(Command::InsertChar('x')).unwrap();
        s.apply(Command::Save).unwrap();
        assert_eq!(s.edit_count(), 1);
    }

    #[test]
    fn test_run_loop_stops_on_quit() {
        let keys = [
            KeyPress::plain(Key::Char('h')),
            KeyPress::plain(Key::Char('i')),
            KeyPress::plain(Key::Escape), // unbound: ignored
            KeyPress::ctrl('q'),
        ];
        let mut s = EditorSession::with_buffer(
            FakeSurface::with_keys(10, 40, &keys),
            Box::new(RuleLexer::plain()),
            Theme::dark(),
            LineBuffer::new(),
            None,
        )
        .unwrap();

        s.run().unwrap();
        assert_eq!(s.buffer().line(0).unwrap().to_string(), "hi");
    }

    #[test]
    fn test_degraded_load_yields_editable_message_line() {
        let dir = tempfile::tempdir().unwrap();
        // Loading a directory is an IO error other than NotFound.
        let buffer = LineBuffer::load(dir.path());
        assert_eq!(buffer.len(), 1);
        assert!(buffer.line(0).unwrap().to_string().starts_with("Error:"));
    }
}
