//! The language engine facade.
//!
//! An [`Engine`] owns an immutable [`Registry`] plus classifier settings and
//! exposes scanning, validation, classification, detection and definition
//! lookup by language name. Engines are built once through an
//! [`EngineBuilder`] and are `Send + Sync`, so a single instance can be
//! shared across threads.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::classifier::{self, Classification, ClassifierConfig};
use crate::confidence::Confidence;
use crate::definition::{self, Definition};
use crate::error::EngineError;
use crate::profile::{LanguageProfile, load_profiles};
use crate::registry::{Registry, RegistryBuilder};
use crate::scanner::{Tokens, scan};
use crate::validator::{Verdict, validate};

/// Origin name used for the compiled-in catalogue in error messages.
pub const BUILTIN_ORIGIN: &str = "builtin";

const BUILTIN_PROFILES: &str = include_str!("../profiles/builtin.yaml");

/// Which stage of detection decided the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStage {
    /// The file extension is claimed by a profile.
    Extension,
    /// A profile's text signature occurs in the source.
    Signature,
    /// The classifier's best candidate cleared the confidence threshold.
    Classifier,
}

impl fmt::Display for DetectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Extension => "extension",
            Self::Signature => "signature",
            Self::Classifier => "classifier",
        })
    }
}

/// The outcome of [`Engine::detect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    language: String,
    stage: DetectionStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<Confidence>,
}

impl Detection {
    /// Returns the detected profile name.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the stage that decided.
    #[must_use]
    pub const fn stage(&self) -> DetectionStage {
        self.stage
    }

    /// Returns the classifier confidence for classifier detections.
    #[must_use]
    pub const fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }
}

/// Collects profiles and settings for an [`Engine`].
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    registry: RegistryBuilder,
    classifier: ClassifierConfig,
    min_confidence: Confidence,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            registry: RegistryBuilder::new(),
            classifier: ClassifierConfig::default(),
            min_confidence: Confidence::from_per_mille(100),
        }
    }
}

impl EngineBuilder {
    /// Creates a builder with no profiles and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateLanguage`] if the name is taken; the
    /// builder is left unchanged.
    pub fn register_profile(&mut self, profile: LanguageProfile) -> Result<(), EngineError> {
        self.registry.register(profile)
    }

    /// Registers the compiled-in profile catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateLanguage`] if any catalogue language
    /// is already registered.
    pub fn with_builtin_profiles(&mut self) -> Result<(), EngineError> {
        self.with_profile_document(BUILTIN_PROFILES, BUILTIN_ORIGIN)
    }

    /// Parses a YAML profile document and registers its profiles.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProfileSource`] or
    /// [`EngineError::MalformedProfile`] for bad documents, and
    /// [`EngineError::DuplicateLanguage`] when a name is already taken.
    pub fn with_profile_document(&mut self, yaml: &str, origin: &str) -> Result<(), EngineError> {
        let profiles = load_profiles(yaml, origin)?;
        debug!(origin, count = profiles.len(), "loaded profile document");
        self.registry.register_all(profiles)
    }

    /// Sets the classifier tunables.
    #[must_use]
    pub const fn classifier_config(mut self, config: ClassifierConfig) -> Self {
        self.classifier = config;
        self
    }

    /// Sets the minimum confidence for classifier-based detection.
    #[must_use]
    pub const fn min_confidence(mut self, min_confidence: Confidence) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Freezes the registry and returns the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            registry: self.registry.build(),
            classifier: self.classifier,
            min_confidence: self.min_confidence,
        }
    }
}

/// Language identification and validation over an immutable registry.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
    classifier: ClassifierConfig,
    min_confidence: Confidence,
}

impl Engine {
    /// Starts an [`EngineBuilder`].
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Builds an engine holding only the compiled-in catalogue with default
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue fails to load.
    pub fn with_builtin_profiles() -> Result<Self, EngineError> {
        let mut builder = EngineBuilder::new();
        builder.with_builtin_profiles()?;
        Ok(builder.build())
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the classifier tunables.
    #[must_use]
    pub const fn classifier_config(&self) -> ClassifierConfig {
        self.classifier
    }

    /// Returns the detection threshold.
    #[must_use]
    pub const fn min_confidence(&self) -> Confidence {
        self.min_confidence
    }

    /// Scans `source` as `language`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownLanguage`] for unregistered names.
    pub fn scan<'a>(&'a self, source: &'a str, language: &str) -> Result<Tokens<'a>, EngineError> {
        let profile = self.registry.get(language)?;
        Ok(scan(source, profile))
    }

    /// Validates `source` as `language`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownLanguage`] for unregistered names.
    pub fn validate(&self, source: &str, language: &str) -> Result<Verdict, EngineError> {
        let profile = self.registry.get(language)?;
        Ok(validate(scan(source, profile), profile))
    }

    /// Lists the definitions in `source` scanned as `language`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownLanguage`] for unregistered names.
    pub fn definitions(
        &self,
        source: &str,
        language: &str,
    ) -> Result<Vec<Definition>, EngineError> {
        let profile = self.registry.get(language)?;
        Ok(definition::definitions(scan(source, profile), profile))
    }

    /// Ranks every registered language against `source`.
    #[must_use]
    pub fn classify(&self, source: &str) -> Classification {
        classifier::classify(source, &self.registry, &self.classifier)
    }

    /// Detects the language of `source`, optionally using its file path.
    ///
    /// Tries the file extension first, then text signatures in precedence
    /// order, then the classifier's best candidate when it reaches the
    /// minimum confidence.
    #[must_use]
    pub fn detect(&self, path: Option<&Path>, source: &str) -> Option<Detection> {
        let by_extension = path
            .and_then(|file| file.extension())
            .and_then(|extension| extension.to_str())
            .and_then(|extension| self.registry.for_extension(extension));
        if let Some(profile) = by_extension {
            return Some(Detection {
                language: profile.name().to_owned(),
                stage: DetectionStage::Extension,
                confidence: None,
            });
        }

        let by_signature = self
            .registry
            .all()
            .iter()
            .find(|profile| profile.matching_signature(source).is_some());
        if let Some(profile) = by_signature {
            return Some(Detection {
                language: profile.name().to_owned(),
                stage: DetectionStage::Signature,
                confidence: None,
            });
        }

        let classification = self.classify(source);
        let top = classification.top()?;
        if top.confidence() < self.min_confidence || top.confidence() == Confidence::ZERO {
            debug!(
                best = top.language(),
                confidence = %top.confidence(),
                "no language reached the detection threshold"
            );
            return None;
        }
        Some(Detection {
            language: top.language().to_owned(),
            stage: DetectionStage::Classifier,
            confidence: Some(top.confidence()),
        })
    }
}
