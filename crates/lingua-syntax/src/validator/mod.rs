//! Structural validation over a token stream.
//!
//! The validator never builds a parse tree. It checks bracket balance,
//! illegal characters, unterminated literals and comments, and forbidden
//! keyword adjacencies, accumulating every finding into a [`Verdict`].

use std::fmt;

use serde::Serialize;

use crate::profile::LanguageProfile;
use crate::token::{BracketRole, Token, TokenKind};

/// The category of a structural problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A closing bracket with no open bracket before it.
    UnmatchedClose,
    /// A closing bracket that does not match the innermost open bracket.
    MismatchedClose,
    /// An open bracket that is never closed.
    UnclosedOpen,
    /// A character the profile does not recognise.
    UnknownCharacter,
    /// A literal without its closing delimiter.
    UnterminatedLiteral,
    /// A block comment without its closing marker.
    UnterminatedComment,
    /// Two keywords the profile forbids from appearing side by side.
    IllegalAdjacency,
}

impl DiagnosticKind {
    /// Returns the stable kebab-case code for the kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnmatchedClose => "unmatched-close",
            Self::MismatchedClose => "mismatched-close",
            Self::UnclosedOpen => "unclosed-open",
            Self::UnknownCharacter => "unknown-character",
            Self::UnterminatedLiteral => "unterminated-literal",
            Self::UnterminatedComment => "unterminated-comment",
            Self::IllegalAdjacency => "illegal-adjacency",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A located structural problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    offset: usize,
    message: String,
}

impl Diagnostic {
    /// Creates a diagnostic at byte `offset`.
    #[must_use]
    pub fn new(kind: DiagnosticKind, offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            message: message.into(),
        }
    }

    /// Returns the diagnostic kind.
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Returns the byte offset the diagnostic points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.offset, self.message, self.kind)
    }
}

/// The outcome of validating one source text.
///
/// A verdict passes if and only if it carries no diagnostics. Diagnostics
/// are ordered by offset; diagnostics at the same offset keep the order in
/// which they were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pass: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Verdict {
    /// Builds a verdict from unordered diagnostics.
    #[must_use]
    pub fn from_diagnostics(mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by_key(Diagnostic::offset);
        Self {
            pass: diagnostics.is_empty(),
            diagnostics,
        }
    }

    /// Returns `true` when no diagnostics were found.
    #[must_use]
    pub const fn pass(&self) -> bool {
        self.pass
    }

    /// Returns the diagnostics ordered by offset.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the verdict, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Validates a token stream produced with `profile`.
pub fn validate<'src, I>(tokens: I, profile: &LanguageProfile) -> Verdict
where
    I: IntoIterator<Item = Token<'src>>,
{
    let mut checker = Checker::new(profile);
    for token in tokens {
        checker.visit(token);
    }
    checker.finish()
}

#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    pair: usize,
    offset: usize,
    ch: char,
}

struct Checker<'p, 'src> {
    profile: &'p LanguageProfile,
    stack: Vec<OpenBracket>,
    previous_keyword: Option<&'src str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'p, 'src> Checker<'p, 'src> {
    const fn new(profile: &'p LanguageProfile) -> Self {
        Self {
            profile,
            stack: Vec::new(),
            previous_keyword: None,
            diagnostics: Vec::new(),
        }
    }

    fn visit(&mut self, token: Token<'src>) {
        match token.kind() {
            TokenKind::Whitespace => return,
            TokenKind::Comment => {
                if token.is_malformed() {
                    self.report(
                        DiagnosticKind::UnterminatedComment,
                        token.start(),
                        "block comment is never closed",
                    );
                }
                return;
            }
            TokenKind::Literal(_) if token.is_malformed() => self.report(
                DiagnosticKind::UnterminatedLiteral,
                token.start(),
                "literal is never closed",
            ),
            TokenKind::Unknown => self.report(
                DiagnosticKind::UnknownCharacter,
                token.start(),
                format!("unexpected character {:?}", token.text()),
            ),
            TokenKind::Punctuation(Some(role)) => self.bracket(role, token),
            TokenKind::Keyword => self.adjacency(token),
            TokenKind::Literal(_) | TokenKind::Identifier | TokenKind::Punctuation(None) => {}
        }
        self.previous_keyword = token.is_keyword().then(|| token.text());
    }

    fn adjacency(&mut self, token: Token<'src>) {
        if let Some(previous) = self.previous_keyword
            && self.profile.forbids_adjacent(previous, token.text())
        {
            self.report(
                DiagnosticKind::IllegalAdjacency,
                token.start(),
                format!("'{}' cannot follow '{previous}'", token.text()),
            );
        }
    }

    fn bracket(&mut self, role: BracketRole, token: Token<'src>) {
        let ch = token.text().chars().next().unwrap_or_default();
        match role {
            BracketRole::Open(pair) => self.stack.push(OpenBracket {
                pair,
                offset: token.start(),
                ch,
            }),
            BracketRole::Close(pair) => self.close(pair, ch, token.start()),
        }
    }

    fn close(&mut self, pair: usize, ch: char, offset: usize) {
        let Some(innermost) = self.stack.last().copied() else {
            self.report(
                DiagnosticKind::UnmatchedClose,
                offset,
                format!("'{ch}' has no matching open bracket"),
            );
            return;
        };
        if innermost.pair == pair {
            self.stack.pop();
            return;
        }

        match self.stack.iter().rposition(|open| open.pair == pair) {
            Some(depth) => {
                let unclosed = self.stack.split_off(depth);
                for open in unclosed.iter().skip(1) {
                    self.report_unclosed(*open);
                }
            }
            None => self.report(
                DiagnosticKind::MismatchedClose,
                offset,
                format!("'{ch}' does not close '{}'", innermost.ch),
            ),
        }
    }

    fn report_unclosed(&mut self, open: OpenBracket) {
        self.report(
            DiagnosticKind::UnclosedOpen,
            open.offset,
            format!("'{}' is never closed", open.ch),
        );
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(kind, offset, message));
    }

    fn finish(mut self) -> Verdict {
        let remaining = std::mem::take(&mut self.stack);
        for open in remaining {
            self.report_unclosed(open);
        }
        Verdict::from_diagnostics(self.diagnostics)
    }
}

#[cfg(test)]
mod tests;
