//! Fixture harness.
//!
//! A fixture is a labelled sample stored as
//! `languages/<language>/<stem>.<ext>`. The stem `valid` expects the
//! validator to pass, `invalid` expects it to fail, and any other stem is a
//! classification fixture expecting its directory language to rank first.
//! [`FixtureRunner`] evaluates fixtures against an [`Engine`] and never
//! aborts a batch because one fixture misbehaves.

mod corpus;

use std::fmt;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classifier::Classification;
use crate::engine::Engine;
use crate::error::HarnessError;
use crate::validator::Verdict;

pub use corpus::load_corpus;

/// Directory that introduces the language component of a fixture path.
pub const LANGUAGES_DIR: &str = "languages";

/// What a fixture expects from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "expect", content = "language", rename_all = "snake_case")]
pub enum Expectation {
    /// The validator reports no diagnostics.
    Pass,
    /// The validator reports at least one diagnostic.
    Fail,
    /// The classifier ranks the named language first.
    TopLanguage(String),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("valid"),
            Self::Fail => f.write_str("invalid"),
            Self::TopLanguage(language) => write!(f, "classified as {language}"),
        }
    }
}

/// A labelled sample. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    path: PathBuf,
    source: String,
    declared_language: Option<String>,
    expectation: Expectation,
}

impl Fixture {
    /// Creates a fixture from explicit parts.
    ///
    /// A `declared_language` of `None` makes validation fixtures detect
    /// their language first.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
        declared_language: Option<String>,
        expectation: Expectation,
    ) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            declared_language,
            expectation,
        }
    }

    /// Derives the language and expectation from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidFixturePath`] when the path has no
    /// `languages/<language>/<file>` suffix or the file has no stem.
    pub fn from_path(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self, HarnessError> {
        let fixture_path = path.into();
        let (language, stem) = fixture_labels(&fixture_path)?;
        let (declared_language, expectation) = match stem.as_str() {
            "valid" => (Some(language), Expectation::Pass),
            "invalid" => (Some(language), Expectation::Fail),
            _ => (None, Expectation::TopLanguage(language)),
        };
        Ok(Self {
            path: fixture_path,
            source: source.into(),
            declared_language,
            expectation,
        })
    }

    /// Returns the fixture path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the sample text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the declared language, if any.
    #[must_use]
    pub fn declared_language(&self) -> Option<&str> {
        self.declared_language.as_deref()
    }

    /// Returns the expected outcome.
    #[must_use]
    pub const fn expectation(&self) -> &Expectation {
        &self.expectation
    }
}

fn fixture_labels(path: &Path) -> Result<(String, String), HarnessError> {
    let components: Vec<&str> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let marker = components
        .iter()
        .rposition(|part| *part == LANGUAGES_DIR)
        .ok_or_else(|| {
            HarnessError::invalid_fixture_path(path, "expected a 'languages' directory")
        })?;
    let language = components
        .get(marker + 1)
        .filter(|_| components.len() > marker + 2)
        .ok_or_else(|| {
            HarnessError::invalid_fixture_path(path, "expected languages/<language>/<file>")
        })?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| HarnessError::invalid_fixture_path(path, "file has no stem"))?;

    Ok(((*language).to_ascii_lowercase(), stem.to_owned()))
}

/// What the engine produced for a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Observation {
    /// The validator ran.
    Verdict(Verdict),
    /// The classifier ran.
    Classification(Classification),
    /// The engine could not evaluate the fixture.
    Error(String),
}

/// The result of evaluating one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureOutcome {
    path: PathBuf,
    language: Option<String>,
    expectation: Expectation,
    passed: bool,
    observation: Observation,
}

impl FixtureOutcome {
    /// Returns the fixture path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the language the fixture was evaluated as, if one was known.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns the fixture's expectation.
    #[must_use]
    pub const fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    /// Returns `true` when the observation met the expectation.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    /// Returns what the engine produced.
    #[must_use]
    pub const fn observation(&self) -> &Observation {
        &self.observation
    }

    /// Explains why the fixture failed, or `None` if it passed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        if self.passed {
            return None;
        }
        Some(match &self.observation {
            Observation::Error(message) => message.clone(),
            Observation::Verdict(verdict) => match verdict.diagnostics().first() {
                Some(first) => format!(
                    "expected {} but found {} diagnostic(s), first: {}",
                    self.expectation,
                    verdict.diagnostics().len(),
                    first.message()
                ),
                None => format!("expected {} but validation passed", self.expectation),
            },
            Observation::Classification(classification) => {
                let top = classification
                    .top()
                    .map_or("nothing", |candidate| candidate.language());
                format!("expected {} but ranked {top} first", self.expectation)
            }
        })
    }
}

/// Harness settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Evaluate fixtures on a rayon thread pool.
    pub parallel: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Aggregated outcomes of one harness run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarnessReport {
    outcomes: Vec<FixtureOutcome>,
}

impl HarnessReport {
    /// Returns every outcome in input order.
    #[must_use]
    pub fn outcomes(&self) -> &[FixtureOutcome] {
        &self.outcomes
    }

    /// Returns the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed)
    }

    /// Returns the number of passed fixtures.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed).count()
    }

    /// Returns the number of failed fixtures.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Returns the number of evaluated fixtures.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` when every fixture passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }
}

/// Evaluates fixtures against an engine.
#[derive(Debug, Clone, Copy)]
pub struct FixtureRunner<'e> {
    engine: &'e Engine,
    config: HarnessConfig,
}

impl<'e> FixtureRunner<'e> {
    /// Creates a runner over `engine`.
    #[must_use]
    pub const fn new(engine: &'e Engine, config: HarnessConfig) -> Self {
        Self { engine, config }
    }

    /// Evaluates every fixture and aggregates the outcomes.
    #[must_use]
    pub fn run(&self, fixtures: &[Fixture]) -> HarnessReport {
        let outcomes = if self.config.parallel {
            self.run_parallel(fixtures)
        } else {
            self.run_sequential(fixtures)
        };
        let report = HarnessReport { outcomes };
        info!(
            total = report.total(),
            passed = report.passed(),
            failed = report.failed(),
            "fixture run complete"
        );
        report
    }

    fn run_sequential(&self, fixtures: &[Fixture]) -> Vec<FixtureOutcome> {
        fixtures.iter().map(|fixture| self.evaluate(fixture)).collect()
    }

    fn run_parallel(&self, fixtures: &[Fixture]) -> Vec<FixtureOutcome> {
        rayon::ThreadPoolBuilder::new()
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| {
                    fixtures
                        .par_iter()
                        .map(|fixture| self.evaluate(fixture))
                        .collect::<Vec<_>>()
                })
            })
            .unwrap_or_else(|error| {
                warn!("failed to create thread pool ({error}), running sequentially");
                self.run_sequential(fixtures)
            })
    }

    /// Evaluates a single fixture.
    #[must_use]
    pub fn evaluate(&self, fixture: &Fixture) -> FixtureOutcome {
        let (language, observation, passed) = match fixture.expectation() {
            Expectation::TopLanguage(expected) => {
                let classification = self.engine.classify(fixture.source());
                let passed = classification
                    .top()
                    .is_some_and(|candidate| candidate.language() == expected);
                (
                    Some(expected.clone()),
                    Observation::Classification(classification),
                    passed,
                )
            }
            Expectation::Pass | Expectation::Fail => self.evaluate_verdict(fixture),
        };

        if !passed {
            debug!(path = %fixture.path().display(), "fixture failed");
        }
        FixtureOutcome {
            path: fixture.path().to_path_buf(),
            language,
            expectation: fixture.expectation().clone(),
            passed,
            observation,
        }
    }

    fn evaluate_verdict(&self, fixture: &Fixture) -> (Option<String>, Observation, bool) {
        let language = fixture.declared_language().map(str::to_owned).or_else(|| {
            self.engine
                .detect(Some(fixture.path()), fixture.source())
                .map(|detection| detection.language().to_owned())
        });
        let Some(name) = language else {
            return (
                None,
                Observation::Error("could not determine the fixture language".to_owned()),
                false,
            );
        };

        match self.engine.validate(fixture.source(), &name) {
            Ok(verdict) => {
                let passed = verdict.pass() == (*fixture.expectation() == Expectation::Pass);
                (Some(name), Observation::Verdict(verdict), passed)
            }
            Err(error) => (Some(name), Observation::Error(error.to_string()), false),
        }
    }
}
