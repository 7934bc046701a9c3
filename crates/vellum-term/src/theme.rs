//! Token category to terminal color mapping.

use crossterm::style::Color;
use vellum_syntax::TokenCategory;

use crate::surface::Style;

/// The color table the renderer paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub keyword: Color,
    pub name: Color,
    pub string: Color,
    pub comment: Color,
    pub operator: Color,
    pub punctuation: Color,
    pub number: Color,
    pub other: Color,
    /// Status line style, usually reverse video.
    pub status: Style,
}

impl Theme {
    /// The default palette: one ANSI color per category on the terminal's
    /// own background, status line in reverse video.
    pub fn dark() -> Self {
        Self {
            keyword: Color::Blue,
            name: Color::Cyan,
            string: Color::Green,
            comment: Color::Magenta,
            operator: Color::Yellow,
            punctuation: Color::Red,
            number: Color::Blue,
            other: Color::White,
            status: Style::fg(Color::Black).on(Color::White),
        }
    }

    /// A colorless palette for terminals where the ANSI colors read badly.
    pub fn mono() -> Self {
        Self {
            keyword: Color::White,
            name: Color::White,
            string: Color::White,
            comment: Color::Grey,
            operator: Color::White,
            punctuation: Color::White,
            number: Color::White,
            other: Color::White,
            status: Style::fg(Color::Black).on(Color::White),
        }
    }

    /// Looks up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    /// The style for one token category.
    pub fn style_for(&self, category: TokenCategory) -> Style {
        let fg = match category {
            TokenCategory::Keyword => self.keyword,
            TokenCategory::Name => self.name,
            TokenCategory::String => self.string,
            TokenCategory::Comment => self.comment,
            TokenCategory::Operator => self.operator,
            TokenCategory::Punctuation => self.punctuation,
            TokenCategory::Number => self.number,
            TokenCategory::Other => self.other,
        };
        Style::fg(fg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
