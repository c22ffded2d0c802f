//! Profile-driven lexical scanner.
//!
//! [`scan`] returns a lazy [`Tokens`] iterator. The scan is lossless: token
//! spans are contiguous, never overlap, and their texts concatenate back to
//! the input. Every token consumes at least one character, so iteration
//! always terminates.

use std::iter::FusedIterator;

use crate::profile::{BlockComment, CommentMarker, LanguageProfile, LiteralRule, LiteralShape};
use crate::token::{LiteralKind, Token, TokenKind};

/// Characters allowed after the escaped character of a character literal,
/// enough for `\u{10FFFF}`.
const MAX_ESCAPE_TAIL: usize = 8;

/// Scans `source` with the rules of `profile`.
#[must_use]
pub const fn scan<'src>(source: &'src str, profile: &'src LanguageProfile) -> Tokens<'src> {
    Tokens {
        source,
        profile,
        offset: 0,
    }
}

/// A lazy, restartable token stream.
///
/// Cloning the iterator or calling [`Tokens::restart`] replays the scan from
/// the current or initial position and yields the same tokens again.
#[derive(Debug, Clone)]
pub struct Tokens<'src> {
    source: &'src str,
    profile: &'src LanguageProfile,
    offset: usize,
}

impl<'src> Tokens<'src> {
    /// Rewinds the stream to the start of the source.
    pub const fn restart(&mut self) {
        self.offset = 0;
    }

    /// Returns the byte offset of the next token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the source being scanned.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the profile driving the scan.
    #[must_use]
    pub const fn profile(&self) -> &'src LanguageProfile {
        self.profile
    }
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.source.get(self.offset..)?;
        let first = rest.chars().next()?;
        let lexeme = lex(self.profile, rest, first);
        let start = self.offset;
        let end = start + lexeme.len;
        let text = self.source.get(start..end)?;
        self.offset = end;
        Some(Token::new(lexeme.kind, text, start, lexeme.malformed))
    }
}

impl FusedIterator for Tokens<'_> {}

#[derive(Debug, Clone, Copy)]
struct Lexeme {
    kind: TokenKind,
    len: usize,
    malformed: bool,
}

impl Lexeme {
    const fn new(kind: TokenKind, len: usize) -> Self {
        Self {
            kind,
            len,
            malformed: false,
        }
    }

    const fn unterminated(kind: TokenKind, len: usize) -> Self {
        Self {
            kind,
            len,
            malformed: true,
        }
    }
}

fn lex(profile: &LanguageProfile, rest: &str, first: char) -> Lexeme {
    if let Some(lexeme) = lex_comment(profile, rest) {
        return lexeme;
    }
    if let Some(lexeme) = lex_literal(profile, rest) {
        return lexeme;
    }
    if profile.is_identifier_start(first) {
        let len = run_length(rest, |ch| profile.is_identifier_continue(ch));
        let word = rest.get(..len).unwrap_or_default();
        let kind = if profile.is_keyword(word) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        return Lexeme::new(kind, len);
    }
    if first.is_ascii_digit() {
        return Lexeme::new(TokenKind::Literal(LiteralKind::Number), number_length(rest));
    }
    if profile.is_punctuation(first) {
        let role = profile.bracket_role(first);
        return Lexeme::new(TokenKind::Punctuation(role), first.len_utf8());
    }
    if first.is_whitespace() {
        return Lexeme::new(TokenKind::Whitespace, run_length(rest, char::is_whitespace));
    }
    Lexeme::new(TokenKind::Unknown, first.len_utf8())
}

fn lex_comment(profile: &LanguageProfile, rest: &str) -> Option<Lexeme> {
    let marker = profile
        .comment_markers()
        .iter()
        .copied()
        .find(|marker| rest.starts_with(profile.comment_marker_text(*marker)))?;

    match marker {
        CommentMarker::Line(_) => {
            let len = rest.find('\n').unwrap_or(rest.len());
            Some(Lexeme::new(TokenKind::Comment, len))
        }
        CommentMarker::Block(index) => {
            let comment = profile.block_comments().get(index)?;
            Some(match block_comment_length(rest, comment) {
                Some(len) => Lexeme::new(TokenKind::Comment, len),
                None => Lexeme::unterminated(TokenKind::Comment, rest.len()),
            })
        }
    }
}

/// Returns the length of the block comment at the start of `rest`, or
/// `None` when input ends first.
fn block_comment_length(rest: &str, comment: &BlockComment) -> Option<usize> {
    let mut depth = 1_usize;
    let mut pos = comment.start().len();
    while let Some(tail) = rest.get(pos..) {
        if tail.starts_with(comment.end()) {
            pos += comment.end().len();
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        } else if comment.is_nested() && tail.starts_with(comment.start()) {
            pos += comment.start().len();
            depth += 1;
        } else {
            pos += tail.chars().next()?.len_utf8();
        }
    }
    None
}

fn lex_literal(profile: &LanguageProfile, rest: &str) -> Option<Lexeme> {
    profile
        .literals()
        .iter()
        .filter(|rule| rest.starts_with(rule.open()))
        .find_map(|rule| match rule.shape() {
            LiteralShape::Text => Some(match text_literal_length(rest, rule) {
                Some(len) => Lexeme::new(TokenKind::Literal(LiteralKind::Text), len),
                None => Lexeme::unterminated(TokenKind::Literal(LiteralKind::Text), rest.len()),
            }),
            LiteralShape::Character => character_literal_length(rest, rule)
                .map(|len| Lexeme::new(TokenKind::Literal(LiteralKind::Character), len)),
        })
}

/// Returns the length of the text literal at the start of `rest`, or `None`
/// when no unescaped closing delimiter follows.
fn text_literal_length(rest: &str, rule: &LiteralRule) -> Option<usize> {
    let mut pos = rule.open().len();
    loop {
        let tail = rest.get(pos..)?;
        let ch = tail.chars().next()?;
        if Some(ch) == rule.escape() {
            pos += ch.len_utf8();
            if let Some(escaped) = rest.get(pos..).and_then(|after| after.chars().next()) {
                pos += escaped.len_utf8();
            }
            continue;
        }
        if tail.starts_with(rule.close()) {
            return Some(pos + rule.close().len());
        }
        pos += ch.len_utf8();
    }
}

/// Returns the length of the character literal at the start of `rest` when
/// exactly one character or one escape sequence precedes the close.
fn character_literal_length(rest: &str, rule: &LiteralRule) -> Option<usize> {
    let open = rule.open().len();
    let body = rest.get(open..)?;
    let first = body.chars().next()?;
    if first == '\n' {
        return None;
    }

    let mut pos = first.len_utf8();
    if Some(first) == rule.escape() {
        let escaped = body.get(pos..)?.chars().next()?;
        if escaped == '\n' {
            return None;
        }
        pos += escaped.len_utf8();
        for _ in 0..=MAX_ESCAPE_TAIL {
            let tail = body.get(pos..)?;
            if tail.starts_with(rule.close()) {
                return Some(open + pos + rule.close().len());
            }
            let ch = tail.chars().next()?;
            if ch == '\n' || Some(ch) == rule.escape() {
                return None;
            }
            pos += ch.len_utf8();
        }
        return None;
    }

    body.get(pos..)?
        .starts_with(rule.close())
        .then(|| open + pos + rule.close().len())
}

fn run_length(rest: &str, accept: impl Fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|&(_, ch)| !accept(ch))
        .map_or(rest.len(), |(index, _)| index)
}

fn number_length(rest: &str) -> usize {
    let integral = run_length(rest, |ch| ch.is_ascii_digit());
    let Some(after) = rest.get(integral..) else {
        return integral;
    };
    let mut chars = after.chars();
    if chars.next() == Some('.') && chars.next().is_some_and(|ch| ch.is_ascii_digit()) {
        let fraction = after
            .get(1..)
            .map_or(0, |digits| run_length(digits, |ch| ch.is_ascii_digit()));
        integral + 1 + fraction
    } else {
        integral
    }
}
