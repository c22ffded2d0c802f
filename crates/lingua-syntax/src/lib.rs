//! Rule-driven language identification and structural validation.
//!
//! Every supported language is described by one declarative
//! [`LanguageProfile`]. A single generic pipeline is driven by those
//! profiles:
//!
//! - **Scanning** via [`scan`] turns source text into a lossless, restartable
//!   stream of typed [`Token`]s
//! - **Validation** via [`validate`] checks bracket balance, literal and
//!   comment termination, stray characters and illegal keyword adjacency,
//!   returning a [`Verdict`] with located [`Diagnostic`]s
//! - **Classification** via [`classify`] ranks every registered profile
//!   against unlabelled text
//! - **Detection** via [`Engine::detect`] cascades through file extensions,
//!   text signatures and the classifier
//! - **Definitions** via [`definitions`] lists the names introduced by a
//!   profile's definition keywords (`fn`, `class`, `def`, ...)
//!
//! Profiles live in an immutable [`Registry`] built once through a
//! [`RegistryBuilder`]. The [`Engine`] facade bundles a registry with
//! classifier settings and ships a compiled-in catalogue of common
//! languages. The [`FixtureRunner`] evaluates labelled sample corpora laid
//! out as `languages/<language>/<valid|invalid>.<ext>`.
//!
//! # Example
//!
//! ```
//! use lingua_syntax::Engine;
//!
//! let engine = Engine::with_builtin_profiles()?;
//! let verdict = engine.validate("fn main() { }", "rust")?;
//! assert!(verdict.pass());
//!
//! let ranking = engine.classify("fn main() { let x = 1; }");
//! assert_eq!(ranking.top().map(|c| c.language()), Some("rust"));
//! # Ok::<(), lingua_syntax::EngineError>(())
//! ```

mod classifier;
mod confidence;
mod definition;
mod engine;
mod error;
mod harness;
mod position;
mod profile;
mod registry;
mod scanner;
mod token;
mod validator;

pub use classifier::{Candidate, Classification, ClassifierConfig, classify, score};
pub use confidence::Confidence;
pub use definition::{Definition, DefinitionKind, definitions};
pub use engine::{BUILTIN_ORIGIN, Detection, DetectionStage, Engine, EngineBuilder};
pub use error::{EngineError, HarnessError};
pub use harness::{
    Expectation, Fixture, FixtureOutcome, FixtureRunner, HarnessConfig, HarnessReport,
    LANGUAGES_DIR, Observation, load_corpus,
};
pub use position::{LineColumn, LineIndex};
pub use profile::{
    BlockComment, BlockCommentDefinition, BracketPair, LanguageProfile, LiteralDefinition,
    LiteralRule, LiteralShape, ProfileBuilder, ProfileDefinition, ProfileDocument, load_profiles,
};
pub use registry::{Registry, RegistryBuilder};
pub use scanner::{Tokens, scan};
pub use token::{BracketRole, LiteralKind, Token, TokenKind};
pub use validator::{Diagnostic, DiagnosticKind, Verdict, validate};

#[cfg(test)]
mod tests;
