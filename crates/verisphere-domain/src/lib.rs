//! Verisphere Domain Layer
//!
//! This crate contains the core domain model for the Verisphere truth
//! market. It has ZERO external dependencies and defines the fundamental
//! value objects and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Post**: the stakeable unit - either a freestanding Claim or a
//!   directed, typed Link between two claims
//! - **Side**: the two staking directions on any post (Support / Challenge)
//! - **StakeLot**: one staker's position on one side of one post, carrying
//!   its cumulative queue offsets for positional weighting
//! - **Score**: a signed fixed-point credibility fraction in [-SCALE, SCALE]
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No external crate dependencies
//! - Pure domain types and arithmetic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external collaborators

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod account;
pub mod lot;
pub mod post;
pub mod score;
pub mod side;
pub mod traits;

// Re-exports for convenience
pub use account::AccountId;
pub use lot::StakeLot;
pub use post::{Link, PostId, PostKind};
pub use score::{Score, SCALE};
pub use side::Side;
