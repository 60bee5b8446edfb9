//! Ledger configuration

use verisphere_domain::SCALE;

/// Configuration for stake settlement
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// How many settlement periods make up a year
    ///
    /// Annual rates from the rate policy are prorated over elapsed periods
    /// using this divisor.
    pub periods_per_year: u64,

    /// Floor of the participation factor, SCALE-scaled
    ///
    /// Posts that are tiny relative to the global ceiling earn near the
    /// floor rate regardless of their own imbalance.
    pub participation_floor: u64,

    /// Ceiling of the participation factor, SCALE-scaled
    pub participation_ceiling: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            // Daily settlement
            periods_per_year: 365,
            participation_floor: SCALE as u64 / 100,
            participation_ceiling: SCALE as u64,
        }
    }
}

impl LedgerConfig {
    /// Hourly settlement periods
    pub fn hourly() -> Self {
        Self {
            periods_per_year: 365 * 24,
            ..Self::default()
        }
    }
}
