//! Keyword-led definition extraction.
//!
//! Profiles map some of their keywords to a [`DefinitionKind`]. Whenever
//! such a keyword is followed, skipping whitespace and comments, by an
//! identifier, that identifier is reported as a [`Definition`]. Anything
//! else after the keyword (another keyword, a bracket, a literal) cancels
//! it, so `impl<T>` or `func (r *T)` simply yield nothing.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::profile::LanguageProfile;
use crate::scanner::Tokens;
use crate::token::TokenKind;

/// What a definition keyword introduces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DefinitionKind {
    /// A class or class-like object.
    Class,
    /// An interface or protocol.
    Interface,
    /// A record or union type.
    Struct,
    /// An enumeration.
    Enum,
    /// A trait or mixin.
    Trait,
    /// A function or method.
    Function,
    /// A module.
    Module,
    /// A namespace.
    Namespace,
    /// A type alias.
    Type,
    /// A variable, constant or signal.
    Variable,
    /// A database table or view.
    Table,
}

/// A named definition found in source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Definition {
    kind: DefinitionKind,
    name: String,
    offset: usize,
}

impl Definition {
    /// Returns what the definition introduces.
    #[must_use]
    pub const fn kind(&self) -> DefinitionKind {
        self.kind
    }

    /// Returns the defined name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the byte offset of the introducing keyword.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Collects the definitions in `tokens`, in source order.
#[must_use]
pub fn definitions(tokens: Tokens<'_>, profile: &LanguageProfile) -> Vec<Definition> {
    let mut found = Vec::new();
    let mut pending: Option<(DefinitionKind, usize)> = None;

    let code = tokens.filter(|token| token.is_significant() && token.kind() != TokenKind::Comment);
    for token in code {
        if let Some((kind, offset)) = pending.take()
            && token.kind() == TokenKind::Identifier
        {
            found.push(Definition {
                kind,
                name: token.text().to_owned(),
                offset,
            });
        }
        if token.is_keyword() {
            pending = profile
                .definition_kind(token.text())
                .map(|kind| (kind, token.start()));
        }
    }
    found
}
