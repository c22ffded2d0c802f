//! Error type for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use lingua_syntax::{EngineError, HarnessError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read profile document {path}: {source}")]
    ReadProfiles {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not determine the language of {path}; pass --language")]
    UndetectedLanguage { path: Utf8PathBuf },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Harness(#[from] HarnessError),
    #[error("failed to serialise report: {0}")]
    SerialiseReport(serde_json::Error),
    #[error("failed to write report: {0}")]
    WriteReport(io::Error),
}
