//! Error types for the link graph

use thiserror::Error;
use verisphere_domain::PostId;

/// Errors that can occur when inserting an edge
///
/// Every failure leaves the graph exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A claim cannot link to itself
    #[error("Self-referential link on {0}")]
    SelfReference(PostId),

    /// The edge would make a claim reachable from itself
    #[error("Edge {from} -> {to} would close a cycle")]
    CycleDetected {
        /// Independent claim of the rejected edge
        from: PostId,
        /// Dependent claim of the rejected edge
        to: PostId,
    },

    /// The cycle search exceeded its visitation budget
    #[error("Cycle search visited more than {limit} nodes")]
    TraversalLimitExceeded {
        /// The configured visitation budget
        limit: usize,
    },
}
