//! Language rule registry.
//!
//! Profiles are collected in a [`RegistryBuilder`], which validates each
//! registration and rejects duplicate names. [`RegistryBuilder::build`] then
//! freezes them into a read-only [`Registry`] ordered by precedence rank and
//! name. There is no global registry: each engine owns its own.

use std::collections::HashMap;

use tracing::debug;

use crate::error::EngineError;
use crate::profile::LanguageProfile;

/// Mutable collection of profiles awaiting [`RegistryBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    profiles: HashMap<String, LanguageProfile>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile.
    ///
    /// A failed registration leaves the builder unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateLanguage`] if a profile with the same
    /// name is already registered.
    pub fn register(&mut self, profile: LanguageProfile) -> Result<(), EngineError> {
        let name = profile.name().to_owned();
        if self.profiles.contains_key(&name) {
            return Err(EngineError::duplicate_language(name));
        }
        self.profiles.insert(name, profile);
        Ok(())
    }

    /// Registers every profile in `profiles`, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError::DuplicateLanguage`] encountered.
    /// Profiles registered before the failure stay registered.
    pub fn register_all(
        &mut self,
        profiles: impl IntoIterator<Item = LanguageProfile>,
    ) -> Result<(), EngineError> {
        profiles
            .into_iter()
            .try_for_each(|profile| self.register(profile))
    }

    /// Returns `true` if a profile called `name` has been registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Returns the number of registered profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Freezes the builder into a read-only registry.
    #[must_use]
    pub fn build(self) -> Registry {
        let mut profiles: Vec<LanguageProfile> = self.profiles.into_values().collect();
        profiles.sort_by(|left, right| {
            left.precedence()
                .cmp(&right.precedence())
                .then_with(|| left.name().cmp(right.name()))
        });
        let index = profiles
            .iter()
            .enumerate()
            .map(|(position, profile)| (profile.name().to_owned(), position))
            .collect();
        debug!(languages = profiles.len(), "built language registry");
        Registry { profiles, index }
    }
}

/// Read-only set of language profiles ordered by precedence rank, then
/// name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    profiles: Vec<LanguageProfile>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Starts a new [`RegistryBuilder`].
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up a profile by name. Surrounding whitespace and case are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownLanguage`] if no profile has that name.
    pub fn get(&self, name: &str) -> Result<&LanguageProfile, EngineError> {
        self.find(name)
            .ok_or_else(|| EngineError::unknown_language(name.trim()))
    }

    /// Looks up a profile by name, returning `None` when it is absent.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&LanguageProfile> {
        let normalised = name.trim().to_ascii_lowercase();
        self.index
            .get(&normalised)
            .and_then(|&position| self.profiles.get(position))
    }

    /// Returns `true` if a profile called `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns every profile in precedence order, then name.
    #[must_use]
    pub fn all(&self) -> &[LanguageProfile] {
        &self.profiles
    }

    /// Returns the profile names in precedence order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.profiles.iter().map(LanguageProfile::name)
    }

    /// Returns the first profile, in precedence order, that claims the
    /// file extension `extension`.
    #[must_use]
    pub fn for_extension(&self, extension: &str) -> Option<&LanguageProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.claims_extension(extension))
    }

    /// Returns the number of registered profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` when the registry holds no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
