//! Keyword-density language classifier.
//!
//! Every registered profile scores the source independently: the share of
//! significant tokens that are keywords, plus a bonus when the profile's
//! validator finds nothing wrong, capped at one. Candidates are ranked by
//! score, then precedence rank, then name, so the output is total and
//! deterministic.

use std::cmp::Ordering;

use serde::Serialize;

use crate::confidence::Confidence;
use crate::profile::LanguageProfile;
use crate::registry::Registry;
use crate::scanner::scan;
use crate::token::TokenKind;
use crate::validator::validate;

/// Tunables for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Added to a profile's score when validation reports no diagnostics.
    pub clean_bonus: Confidence,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            clean_bonus: Confidence::from_per_mille(250),
        }
    }
}

/// One profile's score with the evidence behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    language: String,
    #[serde(skip)]
    precedence: u32,
    confidence: Confidence,
    keywords: usize,
    significant_tokens: usize,
    diagnostics: usize,
}

impl Candidate {
    /// Returns the profile name.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the profile's precedence rank.
    #[must_use]
    pub const fn precedence(&self) -> u32 {
        self.precedence
    }

    /// Returns the score.
    #[must_use]
    pub const fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Returns how many keyword tokens the profile recognised.
    #[must_use]
    pub const fn keywords(&self) -> usize {
        self.keywords
    }

    /// Returns how many non-whitespace tokens the scan produced.
    #[must_use]
    pub const fn significant_tokens(&self) -> usize {
        self.significant_tokens
    }

    /// Returns how many diagnostics the profile's validator reported.
    #[must_use]
    pub const fn diagnostics(&self) -> usize {
        self.diagnostics
    }

    fn rank(&self, other: &Self) -> Ordering {
        other
            .confidence
            .cmp(&self.confidence)
            .then_with(|| self.precedence.cmp(&other.precedence))
            .then_with(|| self.language.cmp(&other.language))
    }
}

/// Ranked candidates for one source text, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Classification {
    candidates: Vec<Candidate>,
}

impl Classification {
    /// Returns the best candidate, if any profile is registered.
    #[must_use]
    pub fn top(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Returns every candidate in rank order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Returns the zero-based rank of `language`, if present.
    #[must_use]
    pub fn rank_of(&self, language: &str) -> Option<usize> {
        self.candidates
            .iter()
            .position(|candidate| candidate.language == language)
    }

    /// Returns the number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` when there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Scores `source` against a single profile.
#[must_use]
pub fn score(source: &str, profile: &LanguageProfile, config: &ClassifierConfig) -> Candidate {
    let tokens = scan(source, profile);
    let (keywords, significant_tokens) = tokens
        .clone()
        .filter(|token| token.is_significant())
        .fold((0_usize, 0_usize), |(keywords, total), token| {
            let keyword = usize::from(token.kind() == TokenKind::Keyword);
            (keywords + keyword, total + 1)
        });

    let (confidence, diagnostics) = if significant_tokens == 0 {
        (Confidence::ZERO, 0)
    } else {
        let verdict = validate(tokens, profile);
        let density = Confidence::from_ratio(keywords, significant_tokens);
        let confidence = if verdict.pass() {
            density.saturating_add(config.clean_bonus)
        } else {
            density
        };
        (confidence, verdict.diagnostics().len())
    };

    Candidate {
        language: profile.name().to_owned(),
        precedence: profile.precedence(),
        confidence,
        keywords,
        significant_tokens,
        diagnostics,
    }
}

/// Scores `source` against every profile in `registry` and ranks the
/// results.
#[must_use]
pub fn classify(source: &str, registry: &Registry, config: &ClassifierConfig) -> Classification {
    let mut candidates: Vec<Candidate> = registry
        .all()
        .iter()
        .map(|profile| score(source, profile, config))
        .collect();
    candidates.sort_by(Candidate::rank);
    Classification { candidates }
}
