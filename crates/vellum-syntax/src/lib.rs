//! # Vellum Syntax
//!
//! Lexical analysis for the rendered window.
//!
//! The editor does not tokenize whole documents. Each frame, the text of the
//! currently visible lines is handed to a [`Lexer`], which returns a flat
//! sequence of `(category, run)` pairs. The contract is a partition of the
//! input: the runs concatenate back to exactly the text that went in, in
//! order, with no gaps or overlaps. Renderers rely on this to walk the token
//! stream with a simple write head.

mod lexer;

pub use lexer::RuleLexer;

/// Result type for syntax operations
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Errors that can occur when building a lexer.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
}

/// The closed set of token categories the renderer knows how to color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Name,
    String,
    Comment,
    Operator,
    Punctuation,
    Number,
    Other,
}

/// A `(category, text run)` pair covering a contiguous slice of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub category: TokenCategory,
    pub text: String,
}

impl Token {
    /// Creates a token.
    pub fn new(category: TokenCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// The lexical-analysis capability consumed by the editor core.
///
/// Implementations must be stateless per call: `tokenize` re-lexes the given
/// window from scratch, and the produced runs must partition the input.
pub trait Lexer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Maps a file name to a supported language identifier, falling back to
/// `"plain"`.
pub fn detect_language(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("");
    match ext {
        "rs" => "rust",
        "py" | "pyw" | "pyi" => "python",
        "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" => "javascript",
        "json" | "jsonc" => "json",
        "toml" => "toml",
        _ => "plain",
    }
}

/// Returns the language identifiers [`RuleLexer`] accepts.
pub fn supported_languages() -> &'static [&'static str] {
    &["rust", "python", "javascript", "json", "toml", "plain"]
}
