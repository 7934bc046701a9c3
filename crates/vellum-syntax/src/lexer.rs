//! Rule-table tokenizer.
//!
//! One pass over the window text, longest-match per rule, every character
//! consumed exactly once. Rules are per-language tables of keywords and
//! comment delimiters; everything the tables don't claim falls out as
//! `Name`, `Operator`, `Punctuation`, `Number`, or `Other`.

use crate::{Lexer, SyntaxError, SyntaxResult, Token, TokenCategory};

/// Per-language lexical rules.
struct LangRules {
    keywords: &'static [&'static str],
    /// Line comment opener, `""` if the language has none.
    line_comment: &'static str,
    /// Block comment delimiters, if the language has them.
    block_comment: Option<(&'static str, &'static str)>,
    /// Whether `'...'` is a string form.
    single_quote_strings: bool,
    /// Rust-style `'a` lifetimes and `'x'` char literals.
    lifetimes: bool,
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "yield",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "True",
    "False", "None",
];

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var",
    "void", "while", "with", "yield",
];

const RUST: LangRules = LangRules {
    keywords: RUST_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    single_quote_strings: false,
    lifetimes: true,
};

const PYTHON: LangRules = LangRules {
    keywords: PYTHON_KEYWORDS,
    line_comment: "#",
    block_comment: None,
    single_quote_strings: true,
    lifetimes: false,
};

const JAVASCRIPT: LangRules = LangRules {
    keywords: JS_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    single_quote_strings: true,
    lifetimes: false,
};

const JSON: LangRules = LangRules {
    keywords: &["true", "false", "null"],
    line_comment: "",
    block_comment: None,
    single_quote_strings: false,
    lifetimes: false,
};

const TOML: LangRules = LangRules {
    keywords: &["true", "false"],
    line_comment: "#",
    block_comment: None,
    single_quote_strings: true,
    lifetimes: false,
};

const PLAIN: LangRules = LangRules {
    keywords: &[],
    line_comment: "",
    block_comment: None,
    single_quote_strings: false,
    lifetimes: false,
};

/// A [`Lexer`] backed by per-language rule tables.
pub struct RuleLexer {
    rules: &'static LangRules,
}

impl RuleLexer {
    /// Builds a lexer for a language identifier.
    pub fn for_language(lang: &str) -> SyntaxResult<Self> {
        let rules = match lang {
            "rust" | "rs" => &RUST,
            "python" | "py" => &PYTHON,
            "javascript" | "js" | "typescript" | "ts" => &JAVASCRIPT,
            "json" => &JSON,
            "toml" => &TOML,
            "plain" | "text" => &PLAIN,
            _ => {
                tracing::debug!(language = lang, "no lexical rules for language");
                return Err(SyntaxError::UnknownLanguage(lang.to_string()));
            }
        };
        Ok(Self { rules })
    }

    /// A lexer that classifies everything outside the universal rules as
    /// plain text.
    pub fn plain() -> Self {
        Self { rules: &PLAIN }
    }

    /// Consumes one token starting at `start`, returning its category and
    /// end index. Always advances by at least one character.
    fn scan(&self, chars: &[char], start: usize) -> (TokenCategory, usize) {
        let r = self.rules;
        let c = chars[start];

        if c.is_whitespace() {
            let mut i = start;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            return (TokenCategory::Other, i);
        }

        if !r.line_comment.is_empty() && starts_with(chars, start, r.line_comment) {
            let mut i = start;
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            return (TokenCategory::Comment, i);
        }

        if let Some((open, close)) = r.block_comment {
            if starts_with(chars, start, open) {
                let mut i = start + open.chars().count();
                while i < chars.len() && !starts_with(chars, i, close) {
                    i += 1;
                }
                if i < chars.len() {
                    i += close.chars().count();
                }
                return (TokenCategory::Comment, i);
            }
        }

        if c == '"' {
            return (TokenCategory::String, scan_quoted(chars, start, '"'));
        }

        if c == '\'' {
            if r.lifetimes {
                if let Some(&next) = chars.get(start + 1) {
                    if next.is_alphabetic() || next == '_' {
                        let mut i = start + 1;
                        while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                            i += 1;
                        }
                        if chars.get(i) == Some(&'\'') {
                            // Char literal like 'x'
                            return (TokenCategory::String, i + 1);
                        }
                        // Lifetime like 'a
                        return (TokenCategory::Name, i);
                    }
                }
                return (TokenCategory::String, scan_quoted(chars, start, '\''));
            }
            if r.single_quote_strings {
                return (TokenCategory::String, scan_quoted(chars, start, '\''));
            }
            return (TokenCategory::Other, start + 1);
        }

        if c.is_ascii_digit() {
            let mut i = start;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
            {
                i += 1;
            }
            return (TokenCategory::Number, i);
        }

        if c.is_alphabetic() || c == '_' {
            let mut i = start;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let category = if r.keywords.contains(&word.as_str()) {
                TokenCategory::Keyword
            } else {
                TokenCategory::Name
            };
            return (category, i);
        }

        if is_operator(c) {
            let mut i = start + 1;
            while i < chars.len() && is_operator(chars[i]) && i - start < 3 {
                i += 1;
            }
            return (TokenCategory::Operator, i);
        }

        if is_punctuation(c) {
            return (TokenCategory::Punctuation, start + 1);
        }

        (TokenCategory::Other, start + 1)
    }
}

impl Lexer for RuleLexer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let (category, end) = self.scan(&chars, i);
            let run: String = chars[i..end].iter().collect();
            tokens.push(Token::new(category, run));
            i = end;
        }
        tokens
    }
}

/// True if the pattern's characters appear verbatim at `at`.
fn starts_with(chars: &[char], at: usize, pat: &str) -> bool {
    let mut i = at;
    for pc in pat.chars() {
        if chars.get(i) != Some(&pc) {
            return false;
        }
        i += 1;
    }
    !pat.is_empty()
}

/// Scans a quoted run with backslash escapes.
///
/// An unterminated string stops before the line break so the newline stays
/// in a whitespace run.
fn scan_quoted(chars: &[char], start: usize, quote: char) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => i += 2,
            '\n' => return i,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}

fn is_operator(c: char) -> bool {
    matches!(
        c,
        '=' | '!' | '<' | '>' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '~' | '?'
    )
}

fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' | '.' | ':'
    )
}
