//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the core engines and the
//! systems they rely on. Infrastructure implementations live in other
//! crates; the engines only ever see these interfaces.

use crate::{AccountId, PostId, PostKind};

/// The ledger's sole channel for moving the backing asset
///
/// Custody is the pool of asset the stake ledger holds on behalf of all
/// lots. All mint/burn calls originate from the settlement step.
pub trait AssetCustody {
    /// Error type for custody operations
    type Error;

    /// Pull `amount` of the backing asset from `from` into ledger custody
    fn transfer_in(&mut self, from: AccountId, amount: u64) -> Result<(), Self::Error>;

    /// Release `amount` of the backing asset from custody to `to`
    fn transfer_out(&mut self, to: AccountId, amount: u64) -> Result<(), Self::Error>;

    /// Mint `amount` of new supply directly into ledger custody
    fn mint(&mut self, amount: u64) -> Result<(), Self::Error>;

    /// Burn `amount` of supply out of ledger custody
    fn burn(&mut self, amount: u64) -> Result<(), Self::Error>;

    /// Amount currently held in ledger custody
    fn custody_balance(&self) -> u64;
}

/// Externally configured minimum-stake gate
///
/// Consulted by the score engine (propagation gating) and by settlement
/// (posts below the threshold earn nothing).
pub trait ActivityPolicy {
    /// Whether a post with this combined stake participates at all
    fn is_active(&self, total_stake: u64) -> bool;
}

/// Externally configured posting fee
///
/// The fee acts as virtual support once a post is active; it is also
/// charged at claim/link creation by the registry.
pub trait FeePolicy {
    /// The posting fee in backing-asset units
    fn fee_amount(&self) -> u64;
}

/// Externally configured annual rate band for settlement
///
/// Rates are SCALE-scaled annual fractions: a value of SCALE/10 is a 10%
/// annual rate.
pub trait RatePolicy {
    /// Floor of the annual growth/decay band
    fn min_annual_rate(&self) -> u64;

    /// Ceiling of the annual growth/decay band
    fn max_annual_rate(&self) -> u64;
}

/// Source of the current settlement period index
pub trait PeriodClock {
    /// The current period index (monotone, starts at 0)
    fn current_period(&self) -> u64;
}

/// Read access to the post registry
///
/// The registry itself (authoring, text, ownership) is an external
/// collaborator; the core only needs to know whether a post exists and
/// whether it is a claim or a link.
pub trait PostDirectory {
    /// What the post is, or None if it does not exist
    fn kind(&self, post: PostId) -> Option<PostKind>;
}
