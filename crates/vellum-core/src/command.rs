//! Editor commands and the key-to-command table.

use vellum_term::{Key, KeyPress};

/// Everything the session can be asked to do.
///
/// The editor has a single implicit insert mode, so the table below is the
/// whole input language: control chords for session commands, named keys for
/// motion and editing, printable characters for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop the session.
    Quit,
    /// Persist the buffer to its file.
    Save,
    /// Delete left of the cursor, joining lines at column 0.
    DeleteBackward,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Split the current line at the cursor.
    InsertNewline,
    /// Insert one printable character at the cursor.
    InsertChar(char),
}

impl Command {
    /// Maps one key press to a command.
    ///
    /// Returns `None` for anything unbound; the session treats that as a
    /// no-op and keeps running.
    pub fn from_key(press: &KeyPress) -> Option<Command> {
        if press.modifiers.ctrl {
            return match press.key {
                Key::Char('q') => Some(Command::Quit),
                Key::Char('s') => Some(Command::Save),
                _ => None,
            };
        }
        if press.modifiers.alt {
            return None;
        }
        match press.key {
            Key::Backspace => Some(Command::DeleteBackward),
            Key::Up => Some(Command::MoveUp),
            Key::Down => Some(Command::MoveDown),
            Key::Left => Some(Command::MoveLeft),
            Key::Right => Some(Command::MoveRight),
            Key::Enter => Some(Command::InsertNewline),
            Key::Char(c) if ('\u{20}'..='\u{7e}').contains(&c) => Some(Command::InsertChar(c)),
            _ => None,
        }
    }

    /// The command's display name, for trace output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::Quit => "Quit",
            Command::Save => "Save",
            Command::DeleteBackward => "Delete Backward",
            Command::MoveUp => "Move Up",
            Command::MoveDown => "Move Down",
            Command::MoveLeft => "Move Left",
            Command::MoveRight => "Move Right",
            Command::InsertNewline => "Insert Newline",
            Command::InsertChar(_) => "Insert Character",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_term::Modifiers;

    #[test]
    fn test_control_chords() {
        assert_eq!(Command::from_key(&KeyPress::ctrl('q')), Some(Command::Quit));
        assert_eq!(Command::from_key(&KeyPress::ctrl('s')), Some(Command::Save));
        assert_eq!(Command::from_key(&KeyPress::ctrl('x')), None);
    }

    #[test]
    fn test_motion_and_editing_keys() {
        assert_eq!(
            Command::from_key(&KeyPress::plain(Key::Up)),
            Some(Command::MoveUp)
        );
        assert_eq!(
            Command::from_key(&KeyPress::plain(Key::Backspace)),
            Some(Command::DeleteBackward)
        );
        assert_eq!(
            Command::from_key(&KeyPress::plain(Key::Enter)),
            Some(Command::InsertNewline)
        );
    }

    #[test]
    fn test_printable_characters_insert() {
        assert_eq!(
            Command::from_key(&KeyPress::plain(Key::Char('a'))),
            Some(Command::InsertChar('a'))
        );
        assert_eq!(
            Command::from_key(&KeyPress::plain(Key::Char(' '))),
            Some(Command::InsertChar(' '))
        );
        assert_eq!(
            Command::from_key(&KeyPress::plain(Key::Char('~'))),
            Some(Command::InsertChar('~'))
        );
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(Command::from_key(&KeyPress::plain(Key::Escape)), None);
        assert_eq!(Command::from_key(&KeyPress::plain(Key::Tab)), None);
        // Non-ASCII input is outside the buffer's character model.
        assert_eq!(Command::from_key(&KeyPress::plain(Key::Char('é'))), None);
        assert_eq!(
            Command::from_key(&KeyPress::new(
                Key::Char('a'),
                Modifiers {
                    ctrl: false,
                    alt: true,
                    shift: false,
                }
            )),
            None
        );
    }
}
