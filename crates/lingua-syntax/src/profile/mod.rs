//! Declarative language profiles.
//!
//! A [`LanguageProfile`] is the single data structure that drives the
//! scanner, the validator and the classifier. Profiles are assembled with a
//! [`ProfileBuilder`], which checks the structural invariants before handing
//! back an immutable value, or loaded from YAML through [`load_profiles`].

mod document;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use document::{
    BlockCommentDefinition, LiteralDefinition, ProfileDefinition, ProfileDocument, load_profiles,
};

use crate::definition::DefinitionKind;
use crate::error::EngineError;
use crate::token::BracketRole;

/// The shape of the content between a literal's delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralShape {
    /// Free-form text of any length, such as a string literal.
    #[default]
    Text,
    /// Exactly one character or one escape sequence, such as `'a'`.
    Character,
}

/// A block comment delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockComment {
    start: String,
    end: String,
    nested: bool,
}

impl BlockComment {
    /// Creates a non-nesting block comment delimited by `start` and `end`.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            nested: false,
        }
    }

    /// Sets whether comments of this kind may nest.
    #[must_use]
    pub const fn nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Returns the opening marker.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the closing marker.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Returns `true` if comments of this kind nest.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.nested
    }
}

/// A literal delimiter pair with its escape character and shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralRule {
    open: String,
    close: String,
    escape: Option<char>,
    shape: LiteralShape,
}

impl LiteralRule {
    /// Creates a free-form text literal rule.
    #[must_use]
    pub fn text(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            escape: None,
            shape: LiteralShape::Text,
        }
    }

    /// Creates a character-shaped literal rule.
    #[must_use]
    pub fn character(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            shape: LiteralShape::Character,
            ..Self::text(open, close)
        }
    }

    /// Sets the escape character honoured inside the literal.
    #[must_use]
    pub const fn with_escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Returns the opening delimiter.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Returns the closing delimiter.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Returns the escape character, if any.
    #[must_use]
    pub const fn escape(&self) -> Option<char> {
        self.escape
    }

    /// Returns the literal shape.
    #[must_use]
    pub const fn shape(&self) -> LiteralShape {
        self.shape
    }
}

/// A bracket pair that must balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BracketPair {
    /// The opening character.
    pub open: char,
    /// The closing character.
    pub close: char,
}

/// Comment opener recognised by the scanner, ordered longest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommentMarker {
    Line(usize),
    Block(usize),
}

/// The lexical and structural rules for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    name: String,
    precedence: u32,
    keywords: BTreeSet<String>,
    case_insensitive: bool,
    line_comments: Vec<String>,
    block_comments: Vec<BlockComment>,
    comment_markers: Vec<CommentMarker>,
    literals: Vec<LiteralRule>,
    brackets: Vec<BracketPair>,
    punctuation: BTreeSet<char>,
    identifier_extras: BTreeSet<char>,
    forbidden_adjacent: BTreeSet<(String, String)>,
    definitions: BTreeMap<String, DefinitionKind>,
    extensions: Vec<String>,
    signatures: Vec<String>,
}

impl LanguageProfile {
    /// Starts building a profile called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(name)
    }

    /// Returns the unique profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the precedence rank. Lower ranks win ties.
    #[must_use]
    pub const fn precedence(&self) -> u32 {
        self.precedence
    }

    /// Returns the keywords in lexical order.
    pub fn keywords(&self) -> impl ExactSizeIterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Returns `true` if keyword matching ignores case.
    #[must_use]
    pub const fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Returns `true` if `word` is one of this profile's keywords.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        if self.case_insensitive && word.chars().any(char::is_uppercase) {
            return self.keywords.contains(&word.to_lowercase());
        }
        self.keywords.contains(word)
    }

    /// Returns the line comment markers.
    #[must_use]
    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    /// Returns the block comment delimiter pairs.
    #[must_use]
    pub fn block_comments(&self) -> &[BlockComment] {
        &self.block_comments
    }

    /// Returns the literal rules, longest opening delimiter first.
    #[must_use]
    pub fn literals(&self) -> &[LiteralRule] {
        &self.literals
    }

    /// Returns the bracket pairs in declaration order.
    #[must_use]
    pub fn brackets(&self) -> &[BracketPair] {
        &self.brackets
    }

    /// Returns the lower-case file extensions claimed by this profile.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns the characteristic text signatures.
    #[must_use]
    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    /// Returns `true` if the profile claims `extension` (case-insensitive,
    /// without a leading dot).
    #[must_use]
    pub fn claims_extension(&self, extension: &str) -> bool {
        let trimmed = extension.trim_start_matches('.');
        self.extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(trimmed))
    }

    /// Returns the first signature found in `source`, if any.
    #[must_use]
    pub fn matching_signature(&self, source: &str) -> Option<&str> {
        self.signatures
            .iter()
            .map(String::as_str)
            .find(|signature| source.contains(signature))
    }

    /// Returns `true` if `ch` may start an identifier.
    #[must_use]
    pub fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || self.identifier_extras.contains(&ch)
    }

    /// Returns `true` if `ch` may continue an identifier.
    #[must_use]
    pub fn is_identifier_continue(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || self.identifier_extras.contains(&ch)
    }

    /// Returns `true` if `ch` is a legal punctuation character, including
    /// bracket characters.
    #[must_use]
    pub fn is_punctuation(&self, ch: char) -> bool {
        self.punctuation.contains(&ch) || self.bracket_role(ch).is_some()
    }

    /// Returns the bracket role of `ch` when it belongs to a bracket pair.
    #[must_use]
    pub fn bracket_role(&self, ch: char) -> Option<BracketRole> {
        self.brackets
            .iter()
            .enumerate()
            .find_map(|(pair, bracket)| {
                if bracket.open == ch {
                    Some(BracketRole::Open(pair))
                } else if bracket.close == ch {
                    Some(BracketRole::Close(pair))
                } else {
                    None
                }
            })
    }

    /// Returns `true` if the keyword `first` may not be directly followed by
    /// the keyword `second`.
    #[must_use]
    pub fn forbids_adjacent(&self, first: &str, second: &str) -> bool {
        if self.forbidden_adjacent.is_empty() {
            return false;
        }
        let (first_key, second_key) = if self.case_insensitive {
            (first.to_lowercase(), second.to_lowercase())
        } else {
            (first.to_owned(), second.to_owned())
        };
        self.forbidden_adjacent.contains(&(first_key, second_key))
    }

    /// Returns the definition kind introduced by the keyword `word`, if any.
    #[must_use]
    pub fn definition_kind(&self, word: &str) -> Option<DefinitionKind> {
        if self.case_insensitive && word.chars().any(char::is_uppercase) {
            return self.definitions.get(&word.to_lowercase()).copied();
        }
        self.definitions.get(word).copied()
    }

    /// Returns the definition keywords with the kinds they introduce.
    pub fn definition_keywords(&self) -> impl Iterator<Item = (&str, DefinitionKind)> {
        self.definitions
            .iter()
            .map(|(keyword, kind)| (keyword.as_str(), *kind))
    }

    pub(crate) fn comment_markers(&self) -> &[CommentMarker] {
        &self.comment_markers
    }

    pub(crate) fn comment_marker_text(&self, marker: CommentMarker) -> &str {
        match marker {
            CommentMarker::Line(index) => self.line_comments.get(index).map_or("", String::as_str),
            CommentMarker::Block(index) => self
                .block_comments
                .get(index)
                .map_or("", |comment| comment.start()),
        }
    }
}

/// Builder for [`LanguageProfile`].
///
/// `build` validates the profile invariants and fails with
/// [`EngineError::MalformedProfile`] when one is violated.
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    name: String,
    precedence: u32,
    keywords: Vec<String>,
    case_insensitive: bool,
    line_comments: Vec<String>,
    block_comments: Vec<BlockComment>,
    literals: Vec<LiteralRule>,
    brackets: Vec<BracketPair>,
    punctuation: String,
    identifier_extras: String,
    forbidden_adjacent: Vec<(String, String)>,
    definitions: Vec<(String, DefinitionKind)>,
    extensions: Vec<String>,
    signatures: Vec<String>,
}

impl ProfileBuilder {
    /// Creates an empty builder for the profile `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the precedence rank.
    #[must_use]
    pub const fn precedence(mut self, precedence: u32) -> Self {
        self.precedence = precedence;
        self
    }

    /// Adds keywords.
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Makes keyword matching case-insensitive.
    #[must_use]
    pub const fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Adds a line comment marker.
    #[must_use]
    pub fn line_comment(mut self, marker: impl Into<String>) -> Self {
        self.line_comments.push(marker.into());
        self
    }

    /// Adds a block comment delimiter pair.
    #[must_use]
    pub fn block_comment(mut self, comment: BlockComment) -> Self {
        self.block_comments.push(comment);
        self
    }

    /// Adds a literal rule.
    #[must_use]
    pub fn literal(mut self, rule: LiteralRule) -> Self {
        self.literals.push(rule);
        self
    }

    /// Adds a bracket pair.
    #[must_use]
    pub fn bracket(mut self, open: char, close: char) -> Self {
        self.brackets.push(BracketPair { open, close });
        self
    }

    /// Adds legal punctuation characters.
    #[must_use]
    pub fn punctuation(mut self, characters: &str) -> Self {
        self.punctuation.push_str(characters);
        self
    }

    /// Adds characters that are legal inside identifiers.
    #[must_use]
    pub fn identifier_extras(mut self, characters: &str) -> Self {
        self.identifier_extras.push_str(characters);
        self
    }

    /// Forbids the keyword `first` from being directly followed by `second`.
    #[must_use]
    pub fn forbid_adjacent(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.forbidden_adjacent.push((first.into(), second.into()));
        self
    }

    /// Declares that the keyword `keyword` introduces a definition of `kind`.
    #[must_use]
    pub fn definition(mut self, keyword: impl Into<String>, kind: DefinitionKind) -> Self {
        self.definitions.push((keyword.into(), kind));
        self
    }

    /// Adds a file extension hint.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    /// Adds a characteristic text signature.
    #[must_use]
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signatures.push(signature.into());
        self
    }

    /// Validates the collected rules and returns the profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedProfile`] when the name is not a
    /// lower-case identifier, a keyword is not identifier-shaped, a delimiter
    /// is empty or coincides with a keyword, bracket characters repeat, an
    /// adjacency or definition rule names a non-keyword, or identifier
    /// extras overlap the punctuation set.
    pub fn build(self) -> Result<LanguageProfile, EngineError> {
        let Self {
            name,
            precedence,
            keywords,
            case_insensitive,
            line_comments,
            block_comments,
            mut literals,
            brackets,
            punctuation,
            identifier_extras,
            forbidden_adjacent,
            definitions,
            extensions,
            signatures,
        } = self;

        check_name(&name)?;
        let malformed = |message: String| EngineError::malformed_profile(name.as_str(), message);

        let extras: BTreeSet<char> = identifier_extras.chars().collect();
        if let Some(ch) = extras.iter().find(|ch| ch.is_whitespace() || ch.is_ascii_digit()) {
            return Err(malformed(format!("invalid identifier extra {ch:?}")));
        }

        let keyword_set = normalise_keywords(keywords, case_insensitive, &extras).map_err(malformed)?;
        check_delimiters(&line_comments, &block_comments, &literals, &keyword_set)
            .map_err(malformed)?;
        check_brackets(&brackets).map_err(malformed)?;

        let punctuation_set: BTreeSet<char> = punctuation.chars().collect();
        if let Some(ch) = punctuation_set.iter().find(|ch| ch.is_whitespace()) {
            return Err(malformed(format!("whitespace {ch:?} cannot be punctuation")));
        }
        if let Some(ch) = punctuation_set.intersection(&extras).next() {
            return Err(malformed(format!(
                "{ch:?} is both punctuation and an identifier character"
            )));
        }

        let adjacency = forbidden_adjacent
            .into_iter()
            .map(|(first, second)| {
                let pair = if case_insensitive {
                    (first.to_lowercase(), second.to_lowercase())
                } else {
                    (first, second)
                };
                if keyword_set.contains(&pair.0) && keyword_set.contains(&pair.1) {
                    Ok(pair)
                } else {
                    Err(malformed(format!(
                        "adjacency rule '{} {}' names a non-keyword",
                        pair.0, pair.1
                    )))
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        let definition_map = definitions
            .into_iter()
            .map(|(keyword, kind)| {
                let key = if case_insensitive {
                    keyword.to_lowercase()
                } else {
                    keyword
                };
                if keyword_set.contains(&key) {
                    Ok((key, kind))
                } else {
                    Err(malformed(format!("definition keyword {key:?} is not a keyword")))
                }
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        literals.sort_by(|left, right| right.open.len().cmp(&left.open.len()));
        let comment_markers = order_comment_markers(&line_comments, &block_comments);

        let normalised_extensions = extensions
            .into_iter()
            .map(|extension| extension.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        Ok(LanguageProfile {
            name,
            precedence,
            keywords: keyword_set,
            case_insensitive,
            line_comments,
            block_comments,
            comment_markers,
            literals,
            brackets,
            punctuation: punctuation_set,
            identifier_extras: extras,
            forbidden_adjacent: adjacency,
            definitions: definition_map,
            extensions: normalised_extensions,
            signatures,
        })
    }
}

fn check_name(name: &str) -> Result<(), EngineError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(EngineError::malformed_profile(
            name,
            "profile names must be non-empty lower-case ASCII identifiers",
        ))
    }
}

fn normalise_keywords(
    keywords: Vec<String>,
    case_insensitive: bool,
    extras: &BTreeSet<char>,
) -> Result<BTreeSet<String>, String> {
    let identifier_shaped = |word: &str| {
        let mut chars = word.chars();
        chars
            .next()
            .is_some_and(|first| first.is_alphabetic() || first == '_' || extras.contains(&first))
            && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || extras.contains(&ch))
    };

    keywords
        .into_iter()
        .map(|keyword| {
            if !identifier_shaped(&keyword) {
                return Err(format!("keyword {keyword:?} is not identifier-shaped"));
            }
            Ok(if case_insensitive {
                keyword.to_lowercase()
            } else {
                keyword
            })
        })
        .collect()
}

fn check_delimiters(
    line_comments: &[String],
    block_comments: &[BlockComment],
    literals: &[LiteralRule],
    keywords: &BTreeSet<String>,
) -> Result<(), String> {
    let delimiters = line_comments
        .iter()
        .map(String::as_str)
        .chain(
            block_comments
                .iter()
                .flat_map(|comment| [comment.start(), comment.end()]),
        )
        .chain(literals.iter().flat_map(|rule| [rule.open(), rule.close()]));

    for delimiter in delimiters {
        if delimiter.is_empty() {
            return Err("delimiters cannot be empty".to_owned());
        }
        if keywords.contains(delimiter) {
            return Err(format!("delimiter {delimiter:?} coincides with a keyword"));
        }
    }
    Ok(())
}

fn check_brackets(brackets: &[BracketPair]) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for pair in brackets {
        for ch in [pair.open, pair.close] {
            if !seen.insert(ch) {
                return Err(format!("bracket character {ch:?} is used more than once"));
            }
        }
    }
    Ok(())
}

fn order_comment_markers(
    line_comments: &[String],
    block_comments: &[BlockComment],
) -> Vec<CommentMarker> {
    let mut markers: Vec<(usize, CommentMarker)> = line_comments
        .iter()
        .enumerate()
        .map(|(index, marker)| (marker.len(), CommentMarker::Line(index)))
        .chain(
            block_comments
                .iter()
                .enumerate()
                .map(|(index, comment)| (comment.start().len(), CommentMarker::Block(index))),
        )
        .collect();
    markers.sort_by(|left, right| right.0.cmp(&left.0));
    markers.into_iter().map(|(_, marker)| marker).collect()
}
