//! Report models and rendering.
//!
//! Every subcommand produces a [`Report`]. Reports render either as
//! human-readable lines or as pretty-printed JSON.

mod models;
mod render;

use std::io::Write;

use clap::ValueEnum;

use crate::AppError;

pub(crate) use models::{
    ClassificationReport, DefinitionRecord, DefinitionsReport, DetectionReport, LanguageRecord,
    LanguagesReport, Report, ScanReport, TokenRecord, ValidationReport,
};

/// Output format selection for reports.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON.
    Json,
}

/// Output format after resolving `auto` against the terminal state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// One line per item.
    Human,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Writes `report` to `out` in the requested format.
pub(crate) fn write_report<W: Write>(
    report: &Report,
    format: ResolvedOutputFormat,
    out: &mut W,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).map_err(AppError::SerialiseReport)?;
            out.write_all(b"\n").map_err(AppError::WriteReport)?;
        }
        ResolvedOutputFormat::Human => {
            render::human(out, report).map_err(AppError::WriteReport)?;
        }
    }
    out.flush().map_err(AppError::WriteReport)
}
