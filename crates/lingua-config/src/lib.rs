//! Shared configuration for the lingua toolchain.
//!
//! Values are layered by `ortho_config`: built-in defaults, then an optional
//! TOML file named by `--config-path` or `LINGUA_CONFIG_PATH`, then
//! `LINGUA_*` environment variables, then command-line flags.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_CLEAN_BONUS, DEFAULT_LOG_FILTER, DEFAULT_MIN_CONFIDENCE, default_clean_bonus,
    default_log_filter, default_log_filter_string, default_log_format, default_min_confidence,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for the `lingua` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LINGUA")]
pub struct Config {
    /// Tracing filter expression, for example `info` or `lingua_syntax=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
    /// Extra YAML profile document registered after the built-in catalogue.
    #[serde(default)]
    profiles_path: Option<Utf8PathBuf>,
    /// Classifier bonus for cleanly validating sources, in thousandths.
    #[serde(default = "default_clean_bonus")]
    #[ortho_config(default = default_clean_bonus())]
    clean_bonus: u32,
    /// Minimum classifier confidence for detection, in thousandths.
    #[serde(default = "default_min_confidence")]
    #[ortho_config(default = default_min_confidence())]
    min_confidence: u32,
    /// Evaluate fixtures on a single thread.
    #[serde(default)]
    sequential: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            profiles_path: None,
            clean_bonus: DEFAULT_CLEAN_BONUS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            sequential: false,
        }
    }
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the extra profile document path, if configured.
    #[must_use]
    pub fn profiles_path(&self) -> Option<&Utf8Path> {
        self.profiles_path.as_deref()
    }

    /// Returns the classifier clean-validation bonus in thousandths.
    #[must_use]
    pub const fn clean_bonus(&self) -> u32 {
        self.clean_bonus
    }

    /// Returns the detection threshold in thousandths.
    #[must_use]
    pub const fn min_confidence(&self) -> u32 {
        self.min_confidence
    }

    /// Returns `true` when fixture runs should stay on one thread.
    #[must_use]
    pub const fn sequential(&self) -> bool {
        self.sequential
    }
}
