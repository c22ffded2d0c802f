//! Log output formats accepted by `--log-format` and `LINGUA_LOG_FORMAT`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the `lingua` binary writes its diagnostics log to standard error.
///
/// Parsing ignores ASCII case, so `JSON` and `json` are equivalent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One terse line per event.
    #[default]
    Compact,
    /// One JSON object per event with the event fields flattened.
    Json,
}

/// Error returned when a log format name is not recognised.
pub type LogFormatParseError = strum::ParseError;
