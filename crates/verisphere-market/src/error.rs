//! Error types for the market facade

use thiserror::Error;
use verisphere_domain::{AccountId, PostId};
use verisphere_graph::GraphError;
use verisphere_ledger::LedgerError;
use verisphere_score::ScoreError;

/// Errors surfaced by market operations
///
/// Every mutating operation is all-or-nothing: a failed call leaves the
/// registry, graph, ledger, and vault exactly as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// The post is not registered
    #[error("Unknown post: {0}")]
    UnknownPost(PostId),

    /// The operation requires a claim, not a link
    #[error("Not a claim: {0}")]
    NotAClaim(PostId),

    /// The author cannot cover the posting fee
    #[error("Insufficient funds for fee: account {account} has {available}, fee is {fee}")]
    InsufficientFeeFunds {
        /// The author
        account: AccountId,
        /// Their free balance
        available: u64,
        /// The configured fee
        fee: u64,
    },

    /// Graph error (cycle rejection, traversal budget)
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Ledger error (staking, withdrawal, settlement)
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Score query error (malformed input)
    #[error("Score error: {0}")]
    Score(#[from] ScoreError),
}
