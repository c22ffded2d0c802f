//! Token types produced by the scanner.

use std::fmt;
use std::ops::Range;

/// What a literal token holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// A string-like literal.
    Text,
    /// A single character literal.
    Character,
    /// A numeric literal.
    Number,
}

/// The bracket role of a punctuation token, indexed by the profile's
/// bracket pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketRole {
    /// Opens the bracket pair with this index.
    Open(usize),
    /// Closes the bracket pair with this index.
    Close(usize),
}

/// The category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier that matches a profile keyword.
    Keyword,
    /// Any other identifier.
    Identifier,
    /// A string, character or number literal.
    Literal(LiteralKind),
    /// A line or block comment.
    Comment,
    /// A legal punctuation character, possibly a bracket.
    Punctuation(Option<BracketRole>),
    /// A run of whitespace.
    Whitespace,
    /// A character the profile does not recognise.
    Unknown,
}

impl TokenKind {
    /// Returns a short lower-case label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Literal(LiteralKind::Text) => "string",
            Self::Literal(LiteralKind::Character) => "char",
            Self::Literal(LiteralKind::Number) => "number",
            Self::Comment => "comment",
            Self::Punctuation(_) => "punctuation",
            Self::Whitespace => "whitespace",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A slice of source text with its category and byte span.
///
/// Tokens borrow from the scanned source, so they are cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    kind: TokenKind,
    text: &'src str,
    start: usize,
    malformed: bool,
}

impl<'src> Token<'src> {
    pub(crate) const fn new(kind: TokenKind, text: &'src str, start: usize, malformed: bool) -> Self {
        Self {
            kind,
            text,
            start,
            malformed,
        }
    }

    /// Returns the token category.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the raw source text of the token.
    #[must_use]
    pub const fn text(&self) -> &'src str {
        self.text
    }

    /// Returns the byte offset where the token starts.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the byte offset one past the end of the token.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Returns the byte range covered by the token.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns `true` for literals and comments that ran to end of input
    /// without their closing delimiter.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Returns `true` unless the token is whitespace.
    #[must_use]
    pub const fn is_significant(&self) -> bool {
        !matches!(self.kind, TokenKind::Whitespace)
    }

    /// Returns `true` for keyword tokens.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword)
    }
}
