use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default classifier bonus for sources that validate cleanly, in thousandths.
pub const DEFAULT_CLEAN_BONUS: u32 = 250;

/// Default minimum classifier confidence for detection, in thousandths.
pub const DEFAULT_MIN_CONFIDENCE: u32 = 100;

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default clean-validation bonus in thousandths.
#[must_use]
pub const fn default_clean_bonus() -> u32 {
    DEFAULT_CLEAN_BONUS
}

/// Default detection threshold in thousandths.
#[must_use]
pub const fn default_min_confidence() -> u32 {
    DEFAULT_MIN_CONFIDENCE
}
