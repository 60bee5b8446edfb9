//! Stake lot module - one staker's position on one side of one post

use crate::{AccountId, Side};

/// A single staked position, with its queue placement
///
/// `queue_begin`/`queue_end` are the lot's cumulative-amount interval within
/// its side's queue at insertion time: earlier lots occupy lower offsets.
/// `queue_mid` is their midpoint and acts as the lot's positional weight in
/// settlement. Offsets are insertion-time values; they are renumbered only
/// when the queue is compacted after a withdrawal.
///
/// `amount` grows or shrinks at each settlement period, never below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeLot {
    /// Who staked this lot
    pub staker: AccountId,

    /// Current staked amount (mutated by settlement)
    pub amount: u64,

    /// Which side of the post this lot backs
    pub side: Side,

    /// Cumulative queue offset where this lot begins
    pub queue_begin: u64,

    /// Cumulative queue offset where this lot ends
    pub queue_end: u64,

    /// Midpoint of the queue interval (positional weight)
    pub queue_mid: u64,

    /// Settlement period index at which the lot was created
    pub entry_period: u64,
}

impl StakeLot {
    /// Create a lot at the tail of a side queue
    ///
    /// `queue_begin` is the side's cumulative total at insertion time.
    pub fn new(
        staker: AccountId,
        amount: u64,
        side: Side,
        queue_begin: u64,
        entry_period: u64,
    ) -> Self {
        let queue_end = queue_begin + amount;
        Self {
            staker,
            amount,
            side,
            queue_begin,
            queue_end,
            queue_mid: queue_begin + (queue_end - queue_begin) / 2,
            entry_period,
        }
    }

    /// Renumber this lot's queue interval to start at `begin`
    ///
    /// Used by compaction; the interval width is the current amount.
    pub fn renumber(&mut self, begin: u64) {
        self.queue_begin = begin;
        self.queue_end = begin + self.amount;
        self.queue_mid = begin + self.amount / 2;
    }
}
