//! Config-driven implementations of the policy traits

use verisphere_domain::traits::{ActivityPolicy, FeePolicy, RatePolicy};

/// Activity gate with a fixed minimum-stake threshold
#[derive(Debug, Clone, Copy)]
pub struct FixedActivity {
    threshold: u64,
}

impl FixedActivity {
    /// Gate posts below `threshold` combined stake
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }
}

impl ActivityPolicy for FixedActivity {
    fn is_active(&self, total_stake: u64) -> bool {
        total_stake >= self.threshold
    }
}

/// Fixed posting fee
#[derive(Debug, Clone, Copy)]
pub struct FixedFee {
    amount: u64,
}

impl FixedFee {
    /// Charge `amount` per post creation
    pub fn new(amount: u64) -> Self {
        Self { amount }
    }
}

impl FeePolicy for FixedFee {
    fn fee_amount(&self) -> u64 {
        self.amount
    }
}

/// Fixed annual rate band, SCALE-scaled
#[derive(Debug, Clone, Copy)]
pub struct FixedRateBand {
    min: u64,
    max: u64,
}

impl FixedRateBand {
    /// Band from `min` to `max` annual rate
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

impl RatePolicy for FixedRateBand {
    fn min_annual_rate(&self) -> u64 {
        self.min
    }

    fn max_annual_rate(&self) -> u64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_threshold() {
        let policy = FixedActivity::new(100);
        assert!(!policy.is_active(99));
        assert!(policy.is_active(100));
    }

    #[test]
    fn test_fee_and_band() {
        assert_eq!(FixedFee::new(50).fee_amount(), 50);

        let band = FixedRateBand::new(10, 20);
        assert_eq!(band.min_annual_rate(), 10);
        assert_eq!(band.max_annual_rate(), 20);
    }
}
