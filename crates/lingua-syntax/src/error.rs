//! Error types for the language engine and the fixture harness.
//!
//! Structural problems in scanned source are never raised as errors: they
//! are recorded as diagnostics on a [`crate::Verdict`]. The variants here
//! cover lookups against the registry and problems with profile data or
//! fixture files.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while building or querying the language engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// No profile is registered under the requested name.
    #[error("unknown language: {name}")]
    UnknownLanguage {
        /// The name that was requested.
        name: String,
    },

    /// A profile with the same name is already registered.
    #[error("language '{name}' is already registered")]
    DuplicateLanguage {
        /// The conflicting profile name.
        name: String,
    },

    /// A profile violates one of its structural invariants.
    #[error("malformed profile '{name}': {message}")]
    MalformedProfile {
        /// The profile being built.
        name: String,
        /// Description of the violated invariant.
        message: String,
    },

    /// A profile document could not be read or parsed.
    #[error("invalid profile document {origin}: {message}")]
    ProfileSource {
        /// Where the document came from (a path or `builtin`).
        origin: String,
        /// Description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Creates an unknown language error.
    #[must_use]
    pub fn unknown_language(name: impl Into<String>) -> Self {
        Self::UnknownLanguage { name: name.into() }
    }

    /// Creates a duplicate registration error.
    #[must_use]
    pub fn duplicate_language(name: impl Into<String>) -> Self {
        Self::DuplicateLanguage { name: name.into() }
    }

    /// Creates a malformed profile error.
    #[must_use]
    pub fn malformed_profile(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedProfile {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a profile document error.
    #[must_use]
    pub fn profile_source(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProfileSource {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while loading a fixture corpus from disk.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// Reading a corpus entry failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: Arc<io::Error>,
    },

    /// A fixture path does not follow the `languages/<name>/<stem>.<ext>`
    /// layout.
    #[error("invalid fixture path {}: {reason}", path.display())]
    InvalidFixturePath {
        /// The offending path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },
}

impl HarnessError {
    /// Creates an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates an invalid fixture path error.
    #[must_use]
    pub fn invalid_fixture_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFixturePath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
