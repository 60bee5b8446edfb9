//! Score module - signed fixed-point credibility values
//!
//! Scores are fractions in [-1, +1] represented in fixed point with
//! [`SCALE`] as the unit, so every scoring step stays in deterministic
//! integer arithmetic. A score is never stored; it is recomputed on read
//! from ledger and graph state.

use std::fmt;
use std::ops::Neg;

/// Fixed-point unit: a score of `SCALE` means +1.0, `-SCALE` means -1.0
pub const SCALE: i64 = 1_000_000;

/// A signed credibility fraction in the closed range [-SCALE, SCALE]
///
/// The neutral value is zero: the score of a post with no effective stake,
/// and the identity element of score accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(i64);

impl Score {
    /// The neutral score (no credibility either way)
    pub const NEUTRAL: Score = Score(0);

    /// Maximum credibility (+1.0)
    pub const MAX: Score = Score(SCALE);

    /// Minimum credibility (-1.0)
    pub const MIN: Score = Score(-SCALE);

    /// Clamp a raw fixed-point value into the score range
    ///
    /// Accepts i128 so intermediate products of score arithmetic can be
    /// clamped without overflow concerns.
    pub fn saturating(raw: i128) -> Self {
        Self(raw.clamp(-SCALE as i128, SCALE as i128) as i64)
    }

    /// Create a score from an already-bounded raw value
    ///
    /// # Panics
    /// Panics if `raw` is outside [-SCALE, SCALE].
    pub fn from_raw(raw: i64) -> Self {
        assert!(
            (-SCALE..=SCALE).contains(&raw),
            "Score raw value must be in [-SCALE, SCALE]"
        );
        Self(raw)
    }

    /// The raw fixed-point value
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Whether this is the neutral score
    pub fn is_neutral(&self) -> bool {
        self.0 == 0
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score(-self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "+" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:06}", sign, abs / SCALE as u64, abs % SCALE as u64)
    }
}
