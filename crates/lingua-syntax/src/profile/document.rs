//! YAML profile documents.
//!
//! Profile files hold a `profiles:` list. Each entry is deserialized into a
//! [`ProfileDefinition`] and converted into a validated
//! [`LanguageProfile`] through the same builder used by hand-written
//! profiles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BlockComment, LanguageProfile, LiteralRule, LiteralShape};
use crate::definition::DefinitionKind;
use crate::error::EngineError;

/// A parsed profile file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDocument {
    /// The profiles declared by the document.
    #[serde(default)]
    pub profiles: Vec<ProfileDefinition>,
}

/// One profile as written in YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDefinition {
    /// Unique lower-case profile name.
    pub name: String,
    /// Tie-breaking rank; lower wins.
    #[serde(default)]
    pub precedence: u32,
    /// File extensions claimed by the language, without dots.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Characteristic snippets used by signature detection.
    #[serde(default)]
    pub signatures: Vec<String>,
    /// Keywords of the language.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Whether keyword matching ignores case.
    #[serde(default)]
    pub case_insensitive: bool,
    /// Line comment markers.
    #[serde(default)]
    pub line_comments: Vec<String>,
    /// Block comment delimiter pairs.
    #[serde(default)]
    pub block_comments: Vec<BlockCommentDefinition>,
    /// Literal delimiter rules.
    #[serde(default)]
    pub literals: Vec<LiteralDefinition>,
    /// Bracket pairs written as two-character strings such as `"()"`.
    #[serde(default)]
    pub brackets: Vec<String>,
    /// Legal punctuation characters.
    #[serde(default)]
    pub punctuation: String,
    /// Extra characters allowed inside identifiers.
    #[serde(default)]
    pub identifier_extras: String,
    /// Keyword pairs that may not appear next to each other.
    #[serde(default)]
    pub forbidden_adjacent: Vec<[String; 2]>,
    /// Keywords that introduce named definitions, mapped to their kind.
    #[serde(default)]
    pub definitions: BTreeMap<String, DefinitionKind>,
}

/// A block comment delimiter pair as written in YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockCommentDefinition {
    /// Opening marker.
    pub start: String,
    /// Closing marker.
    pub end: String,
    /// Whether the comment nests.
    #[serde(default)]
    pub nested: bool,
}

/// A literal rule as written in YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiteralDefinition {
    /// Opening delimiter.
    pub open: String,
    /// Closing delimiter.
    pub close: String,
    /// Single escape character, if the literal supports escapes.
    #[serde(default)]
    pub escape: Option<String>,
    /// `text` (default) or `character`.
    #[serde(default)]
    pub shape: LiteralShape,
}

impl ProfileDefinition {
    /// Converts the definition into a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedProfile`] when a bracket entry or an
    /// escape is not the expected number of characters, or when the
    /// resulting profile breaks an invariant.
    pub fn into_profile(self) -> Result<LanguageProfile, EngineError> {
        let mut builder = LanguageProfile::builder(self.name.as_str())
            .precedence(self.precedence)
            .keywords(self.keywords)
            .case_insensitive(self.case_insensitive)
            .punctuation(&self.punctuation)
            .identifier_extras(&self.identifier_extras);

        for marker in self.line_comments {
            builder = builder.line_comment(marker);
        }
        for comment in self.block_comments {
            let rule = BlockComment::new(comment.start, comment.end).nested(comment.nested);
            builder = builder.block_comment(rule);
        }
        for literal in self.literals {
            builder = builder.literal(literal_rule(&self.name, literal)?);
        }
        for pair in &self.brackets {
            let mut chars = pair.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(open), Some(close), None) => builder = builder.bracket(open, close),
                _ => {
                    return Err(EngineError::malformed_profile(
                        self.name.as_str(),
                        format!("bracket pair {pair:?} must be exactly two characters"),
                    ));
                }
            }
        }
        for [first, second] in self.forbidden_adjacent {
            builder = builder.forbid_adjacent(first, second);
        }
        for (keyword, kind) in self.definitions {
            builder = builder.definition(keyword, kind);
        }
        for extension in self.extensions {
            builder = builder.extension(extension);
        }
        for signature in self.signatures {
            builder = builder.signature(signature);
        }
        builder.build()
    }
}

fn literal_rule(profile: &str, definition: LiteralDefinition) -> Result<LiteralRule, EngineError> {
    let rule = match definition.shape {
        LiteralShape::Text => LiteralRule::text(definition.open, definition.close),
        LiteralShape::Character => LiteralRule::character(definition.open, definition.close),
    };
    let Some(escape) = definition.escape else {
        return Ok(rule);
    };
    let mut chars = escape.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(rule.with_escape(ch)),
        _ => Err(EngineError::malformed_profile(
            profile,
            format!("escape {escape:?} must be a single character"),
        )),
    }
}

/// Parses a YAML profile document and validates every profile in it.
///
/// `origin` names the document in error messages (a file path or
/// `builtin`).
///
/// # Errors
///
/// Returns [`EngineError::ProfileSource`] when the YAML cannot be parsed
/// and [`EngineError::MalformedProfile`] when a profile breaks an invariant.
pub fn load_profiles(yaml: &str, origin: &str) -> Result<Vec<LanguageProfile>, EngineError> {
    let document: ProfileDocument = serde_saphyr::from_str(yaml)
        .map_err(|error| EngineError::profile_source(origin, error.to_string()))?;
    document
        .profiles
        .into_iter()
        .map(ProfileDefinition::into_profile)
        .collect()
}
