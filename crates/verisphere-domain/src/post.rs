//! Post module - the stakeable unit of the truth market

use std::fmt;

/// Unique identifier for a post (claim or link)
///
/// Identifiers are opaque u64 values assigned monotonically by the post
/// registry: a later post always carries a larger id. The ordering is
/// relied upon only for iteration stability, never for semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(u64);

impl PostId {
    /// Create a PostId from a raw u64 value
    ///
    /// This is primarily for the registry and storage layers.
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw u64 value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "post:{}", self.0)
    }
}

/// A directed, typed relationship between two claims
///
/// A link is itself a stakeable post: staking Support on it asserts the
/// relationship holds, staking Challenge asserts it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// The claim lending (or denying) credence
    pub independent: PostId,

    /// The claim receiving the influence
    pub dependent: PostId,

    /// `false`: independent lends credence to dependent.
    /// `true`: independent undermines dependent.
    pub challenge: bool,
}

impl Link {
    /// Create a new link
    pub fn new(independent: PostId, dependent: PostId, challenge: bool) -> Self {
        Self {
            independent,
            dependent,
            challenge,
        }
    }
}

/// What a post is: a freestanding claim or a link between claims
///
/// Posts are immutable once created except for their accumulated stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    /// A freestanding assertion
    Claim,

    /// A directed, typed edge between two claims
    Link(Link),
}

impl PostKind {
    /// Whether this post is a claim
    pub fn is_claim(&self) -> bool {
        matches!(self, PostKind::Claim)
    }

    /// The link payload, if this post is a link
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            PostKind::Link(link) => Some(link),
            PostKind::Claim => None,
        }
    }
}
