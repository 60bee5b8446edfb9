//! Settlement rate curve
//!
//! Pure arithmetic for one settlement pass: annual-band proration,
//! imbalance magnitude, participation dampening, and per-lot deltas. All
//! values are SCALE-scaled integer fractions so settlement is deterministic
//! across platforms.

use verisphere_domain::{PostId, Side, SCALE};

const SCALE_U: u128 = SCALE as u128;

/// Outcome of one `update_post` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// The settled post
    pub post: PostId,

    /// Whole periods covered by this pass
    pub periods: u64,

    /// Effective SCALE-scaled rate applied over the covered span
    pub rate: u64,

    /// Aggregate growth minted into custody
    pub minted: u64,

    /// Aggregate shrinkage burned from custody
    pub burned: u64,

    /// Which side grew, if the pass applied any rate at all
    pub winning_side: Option<Side>,
}

impl Settlement {
    /// A pass that only advanced the period marker
    pub(crate) fn marker_only(post: PostId, periods: u64) -> Self {
        Self {
            post,
            periods,
            rate: 0,
            minted: 0,
            burned: 0,
            winning_side: None,
        }
    }

    /// Whether this pass moved any value
    pub fn is_no_op(&self) -> bool {
        self.minted == 0 && self.burned == 0
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{}: {} period(s), rate {}, minted {}, burned {}",
            self.post, self.periods, self.rate, self.minted, self.burned
        )
    }
}

/// Prorate a SCALE-scaled annual rate over elapsed whole periods
pub(crate) fn prorate(annual: u64, elapsed: u64, periods_per_year: u64) -> u128 {
    annual as u128 * elapsed as u128 / periods_per_year as u128
}

/// Imbalance magnitude `v = |support - challenge| / total`, SCALE-scaled
pub(crate) fn imbalance_magnitude(support: u64, challenge: u64) -> u128 {
    let total = support as u128 + challenge as u128;
    let n = (support as i128 - challenge as i128).unsigned_abs();
    n * SCALE_U / total
}

/// Participation factor `p = clamp(total / s_max, floor, ceiling)`, SCALE-scaled
pub(crate) fn participation(total: u64, s_max: u64, floor: u64, ceiling: u64) -> u128 {
    let raw = total as u128 * SCALE_U / s_max as u128;
    raw.clamp(floor as u128, ceiling as u128)
}

/// Effective rate inside the prorated band: `r_min + (r_max - r_min)·v·p`
pub(crate) fn effective_rate(r_min: u128, r_max: u128, v: u128, p: u128) -> u128 {
    r_min + (r_max - r_min) * v / SCALE_U * p / SCALE_U
}

/// Positional weight `w = min(queue_mid / s_max, 1)`, SCALE-scaled
pub(crate) fn positional_weight(queue_mid: u64, s_max: u64) -> u128 {
    (queue_mid as u128 * SCALE_U / s_max as u128).min(SCALE_U)
}

/// Per-lot delta `Δ = amount · r_eff · w`
pub(crate) fn lot_delta(amount: u64, rate: u128, weight: u128) -> u64 {
    (amount as u128 * rate * weight / (SCALE_U * SCALE_U)) as u64
}
