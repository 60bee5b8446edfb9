//! Error types for the stake ledger

use thiserror::Error;
use verisphere_domain::PostId;

/// Errors that can occur during ledger operations
///
/// Every failure is all-or-nothing: no custody movement and no lot
/// mutation survives a failed call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Stake and withdraw amounts must be non-zero
    #[error("Amount must be non-zero")]
    ZeroAmount,

    /// The post has no stake book
    #[error("Unknown post: {0}")]
    UnknownPost(PostId),

    /// The caller's lots cannot cover the requested withdrawal
    #[error("Insufficient stake: requested {requested}, available {available}")]
    InsufficientStake {
        /// Amount the caller asked to withdraw
        requested: u64,
        /// Amount the caller actually holds on that side
        available: u64,
    },

    /// The custody collaborator refused an asset movement
    #[error("Custody error: {0}")]
    Custody(String),
}
