//! Fixed-point confidence scores.

use std::fmt;

use serde::{Serialize, Serializer};

const PARTS_PER_MILLION: u32 = 1_000_000;
const PER_MILLE_SCALE: u32 = 1_000;

/// A score in `[0, 1]` stored in parts per million.
///
/// Integer storage keeps ranking exact and deterministic across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Confidence(u32);

impl Confidence {
    /// The lowest score.
    pub const ZERO: Self = Self(0);
    /// The highest score.
    pub const ONE: Self = Self(PARTS_PER_MILLION);

    /// Builds a score from `numerator / denominator`, clamped to `[0, 1]`.
    ///
    /// A zero denominator yields [`Confidence::ZERO`].
    #[must_use]
    pub fn from_ratio(numerator: usize, denominator: usize) -> Self {
        let wide_numerator = u64::try_from(numerator).unwrap_or(u64::MAX);
        let wide_denominator = u64::try_from(denominator).unwrap_or(u64::MAX);
        let scaled = wide_numerator
            .saturating_mul(u64::from(PARTS_PER_MILLION))
            .checked_div(wide_denominator)
            .unwrap_or(0)
            .min(u64::from(PARTS_PER_MILLION));
        Self(u32::try_from(scaled).unwrap_or(PARTS_PER_MILLION))
    }

    /// Builds a score from thousandths, clamped to [`Confidence::ONE`].
    #[must_use]
    pub const fn from_per_mille(per_mille: u32) -> Self {
        let clamped = if per_mille > PER_MILLE_SCALE {
            PER_MILLE_SCALE
        } else {
            per_mille
        };
        Self(clamped * PER_MILLE_SCALE)
    }

    /// Returns the raw parts-per-million value.
    #[must_use]
    pub const fn parts_per_million(self) -> u32 {
        self.0
    }

    /// Adds two scores, capping the result at [`Confidence::ONE`].
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        let sum = self.0.saturating_add(other.0);
        if sum > PARTS_PER_MILLION {
            Self::ONE
        } else {
            Self(sum)
        }
    }

    /// Returns the score as a floating-point fraction for display.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "conversion to a display fraction happens only at the output edge"
    )]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(PARTS_PER_MILLION)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.as_f64())
    }
}

impl Serialize for Confidence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}
