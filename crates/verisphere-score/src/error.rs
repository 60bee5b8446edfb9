//! Error types for the score engine

use thiserror::Error;
use verisphere_domain::PostId;

/// Errors for malformed score queries
///
/// Score reads never mutate state; these are the only failure modes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The post is not registered
    #[error("Unknown post: {0}")]
    UnknownPost(PostId),

    /// Effective scores are defined for claims, not links
    #[error("Not a claim: {0}")]
    NotAClaim(PostId),
}
