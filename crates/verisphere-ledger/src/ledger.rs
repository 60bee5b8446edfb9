//! The stake ledger state handle

use crate::settlement::{
    effective_rate, imbalance_magnitude, lot_delta, participation, positional_weight, prorate,
    Settlement,
};
use crate::{LedgerConfig, LedgerError, SideQueue};
use std::collections::HashMap;
use verisphere_domain::traits::{ActivityPolicy, AssetCustody, RatePolicy};
use verisphere_domain::{AccountId, PostId, Side, StakeLot};

/// Per-post stake book: one queue per side plus the settlement marker
#[derive(Debug, Clone, Default)]
struct PostBook {
    support: SideQueue,
    challenge: SideQueue,
    last_settled: u64,
}

impl PostBook {
    fn queue(&self, side: Side) -> &SideQueue {
        match side {
            Side::Support => &self.support,
            Side::Challenge => &self.challenge,
        }
    }

    fn queue_mut(&mut self, side: Side) -> &mut SideQueue {
        match side {
            Side::Support => &mut self.support,
            Side::Challenge => &mut self.challenge,
        }
    }

    fn combined_total(&self) -> u64 {
        self.support.total() + self.challenge.total()
    }
}

/// The queue-based staking ledger
///
/// Holds every post's side queues, the global ceiling `s_max`, and the
/// settlement configuration. The backing asset is moved exclusively through
/// the [`AssetCustody`] collaborator passed into each mutating call;
/// between calls, custody equals the sum of all live lot amounts.
///
/// `s_max` is the largest combined (support + challenge) total ever
/// observed on a single post. It is monotonically non-decreasing and is
/// refreshed on every stake, withdrawal, and settlement.
#[derive(Debug, Default)]
pub struct StakeLedger {
    books: HashMap<PostId, PostBook>,
    s_max: u64,
    config: LedgerConfig,
}

impl StakeLedger {
    /// Create a ledger with the given configuration
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            books: HashMap::new(),
            s_max: 0,
            config,
        }
    }

    /// The global ceiling: largest combined post total ever observed
    pub fn s_max(&self) -> u64 {
        self.s_max
    }

    /// (support, challenge) totals for a post; zero for unknown posts
    pub fn totals(&self, post: PostId) -> (u64, u64) {
        match self.books.get(&post) {
            Some(book) => (book.support.total(), book.challenge.total()),
            None => (0, 0),
        }
    }

    /// Combined support + challenge total for a post
    pub fn combined_total(&self, post: PostId) -> u64 {
        let (support, challenge) = self.totals(post);
        support + challenge
    }

    /// The lots on one side of a post, in queue order
    pub fn lots(&self, post: PostId, side: Side) -> &[StakeLot] {
        self.books
            .get(&post)
            .map(|book| book.queue(side).lots())
            .unwrap_or(&[])
    }

    /// Every post with a stake book, in arbitrary order
    pub fn posts(&self) -> impl Iterator<Item = PostId> + '_ {
        self.books.keys().copied()
    }

    /// Sum of all live lot amounts across all posts
    ///
    /// Equals the custody balance between calls (the conservation
    /// invariant); recomputed from authoritative lot state, not caches.
    pub fn live_total(&self) -> u64 {
        self.books
            .values()
            .flat_map(|book| {
                book.support
                    .lots()
                    .iter()
                    .chain(book.challenge.lots().iter())
            })
            .map(|lot| lot.amount)
            .sum()
    }

    /// Stake `amount` on one side of a post
    ///
    /// Pulls the amount from `staker` into custody and appends a lot at the
    /// side queue's tail. First contact with a post creates its book with
    /// the settlement marker at `now_period`.
    pub fn stake<C: AssetCustody>(
        &mut self,
        custody: &mut C,
        staker: AccountId,
        post: PostId,
        side: Side,
        amount: u64,
        now_period: u64,
    ) -> Result<(), LedgerError>
    where
        C::Error: std::fmt::Display,
    {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        custody
            .transfer_in(staker, amount)
            .map_err(|e| LedgerError::Custody(e.to_string()))?;

        let book = self.books.entry(post).or_insert_with(|| PostBook {
            last_settled: now_period,
            ..PostBook::default()
        });
        book.queue_mut(side).push(staker, amount, side, now_period);

        self.raise_ceiling(post);
        tracing::trace!(%post, %staker, ?side, amount, "staked");
        Ok(())
    }

    /// Withdraw `amount` of the caller's stake from one side of a post
    ///
    /// Consumes the caller's lots oldest-first, or newest-first when
    /// `latest_first` is set, then compacts the queue so positional
    /// weighting stays consistent. Fails with
    /// [`LedgerError::InsufficientStake`] before any custody movement if
    /// the caller's lots cannot cover the request.
    pub fn withdraw<C: AssetCustody>(
        &mut self,
        custody: &mut C,
        staker: AccountId,
        post: PostId,
        side: Side,
        amount: u64,
        latest_first: bool,
    ) -> Result<(), LedgerError>
    where
        C::Error: std::fmt::Display,
    {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let book = self
            .books
            .get_mut(&post)
            .ok_or(LedgerError::UnknownPost(post))?;
        let queue = book.queue_mut(side);

        let available = queue.staker_total(staker);
        if available < amount {
            return Err(LedgerError::InsufficientStake {
                requested: amount,
                available,
            });
        }

        custody
            .transfer_out(staker, amount)
            .map_err(|e| LedgerError::Custody(e.to_string()))?;

        queue.consume(staker, amount, latest_first);
        queue.compact();

        self.raise_ceiling(post);
        tracing::trace!(%post, %staker, ?side, amount, latest_first, "withdrew");
        Ok(())
    }

    /// Settle a post up to `now_period`
    ///
    /// Permissionless and idempotent per period: a post whose marker is
    /// already at or past `now_period` is left untouched. Winning-side lots
    /// grow and losing-side lots shrink under the supply-normalized rate
    /// curve; growth is minted into custody, shrinkage burned from it. A
    /// losing lot's single-period loss is capped at its amount.
    pub fn update_post<C, A, R>(
        &mut self,
        custody: &mut C,
        post: PostId,
        activity: &A,
        rates: &R,
        now_period: u64,
    ) -> Result<Settlement, LedgerError>
    where
        C: AssetCustody,
        C::Error: std::fmt::Display,
        A: ActivityPolicy,
        R: RatePolicy,
    {
        let s_max = self.s_max;
        let config = self.config.clone();
        let book = self
            .books
            .get_mut(&post)
            .ok_or(LedgerError::UnknownPost(post))?;

        if book.last_settled >= now_period {
            return Ok(Settlement::marker_only(post, 0));
        }
        let elapsed = now_period - book.last_settled;

        let support = book.support.total();
        let challenge = book.challenge.total();
        let total = support + challenge;

        if total == 0 || !activity.is_active(total) || s_max == 0 {
            book.last_settled = now_period;
            return Ok(Settlement::marker_only(post, elapsed));
        }

        let n = support as i128 - challenge as i128;
        if n == 0 {
            book.last_settled = now_period;
            return Ok(Settlement::marker_only(post, elapsed));
        }
        let winning = if n > 0 { Side::Support } else { Side::Challenge };

        let v = imbalance_magnitude(support, challenge);
        let p = participation(
            total,
            s_max,
            config.participation_floor,
            config.participation_ceiling,
        );
        let r_min = prorate(rates.min_annual_rate(), elapsed, config.periods_per_year);
        let r_max = prorate(rates.max_annual_rate(), elapsed, config.periods_per_year);
        let rate = effective_rate(r_min, r_max, v, p);

        let mut minted = 0u64;
        let mut burned = 0u64;
        for side in [Side::Support, Side::Challenge] {
            let wins = side == winning;
            for lot in book.queue_mut(side).lots_mut() {
                let weight = positional_weight(lot.queue_mid, s_max);
                let delta = lot_delta(lot.amount, rate, weight);
                if wins {
                    lot.amount += delta;
                    minted += delta;
                } else {
                    let loss = delta.min(lot.amount);
                    lot.amount -= loss;
                    burned += loss;
                }
            }
        }

        book.support.recompute_total();
        book.challenge.recompute_total();
        book.last_settled = now_period;

        if minted > 0 {
            custody
                .mint(minted)
                .map_err(|e| LedgerError::Custody(e.to_string()))?;
        }
        if burned > 0 {
            custody
                .burn(burned)
                .map_err(|e| LedgerError::Custody(e.to_string()))?;
        }

        self.raise_ceiling(post);

        let settlement = Settlement {
            post,
            periods: elapsed,
            rate: rate as u64,
            minted,
            burned,
            winning_side: Some(winning),
        };
        tracing::debug!(
            %post,
            periods = elapsed,
            rate = settlement.rate,
            minted,
            burned,
            winning = ?winning,
            "settled post"
        );
        Ok(settlement)
    }

    /// Raise the ceiling to a post's combined total if it now exceeds it
    fn raise_ceiling(&mut self, post: PostId) {
        if let Some(book) = self.books.get(&post) {
            let combined = book.combined_total();
            if combined > self.s_max {
                self.s_max = combined;
            }
        }
    }
}
