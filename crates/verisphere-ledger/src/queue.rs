//! Side queue - the ordered lot sequence for one side of one post

use verisphere_domain::{AccountId, Side, StakeLot};

/// Ordered sequence of stake lots for one side of one post
///
/// Earlier lots occupy lower cumulative offsets. The cached `total` equals
/// the sum of lot amounts after every completed mutation. Compaction drops
/// zero-amount lots and renumbers the survivors' offsets contiguously from
/// zero, preserving order.
#[derive(Debug, Clone, Default)]
pub struct SideQueue {
    lots: Vec<StakeLot>,
    total: u64,
}

impl SideQueue {
    /// Sum of all lot amounts on this side
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The lots in queue order
    pub fn lots(&self) -> &[StakeLot] {
        &self.lots
    }

    /// Total amount held by one staker across their lots
    pub fn staker_total(&self, staker: AccountId) -> u64 {
        self.lots
            .iter()
            .filter(|lot| lot.staker == staker)
            .map(|lot| lot.amount)
            .sum()
    }

    /// Append a lot at the queue tail
    ///
    /// The new lot's interval begins at the current total.
    pub(crate) fn push(
        &mut self,
        staker: AccountId,
        amount: u64,
        side: Side,
        entry_period: u64,
    ) {
        let lot = StakeLot::new(staker, amount, side, self.total, entry_period);
        self.total += amount;
        self.lots.push(lot);
    }

    /// Zero out `amount` across the staker's lots
    ///
    /// Walks oldest-first, or newest-first when `latest_first` is set,
    /// partially consuming the last lot touched. The caller must have
    /// verified availability via [`staker_total`](Self::staker_total).
    pub(crate) fn consume(&mut self, staker: AccountId, amount: u64, latest_first: bool) {
        let mut remaining = amount;

        let indices: Vec<usize> = if latest_first {
            (0..self.lots.len()).rev().collect()
        } else {
            (0..self.lots.len()).collect()
        };

        for i in indices {
            if remaining == 0 {
                break;
            }
            let lot = &mut self.lots[i];
            if lot.staker != staker {
                continue;
            }
            let take = lot.amount.min(remaining);
            lot.amount -= take;
            remaining -= take;
        }

        debug_assert_eq!(remaining, 0, "consume called without availability check");
    }

    /// Drop zero-amount lots and renumber offsets contiguously from zero
    pub(crate) fn compact(&mut self) {
        self.lots.retain(|lot| lot.amount > 0);

        let mut offset = 0u64;
        for lot in &mut self.lots {
            lot.renumber(offset);
            offset = lot.queue_end;
        }
        self.total = offset;
    }

    /// Recompute the cached total from authoritative lot amounts
    pub(crate) fn recompute_total(&mut self) {
        self.total = self.lots.iter().map(|lot| lot.amount).sum();
    }

    /// Mutable access to the lots for settlement
    pub(crate) fn lots_mut(&mut self) -> &mut [StakeLot] {
        &mut self.lots
    }
}
