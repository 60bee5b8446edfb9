//! Verisphere Market
//!
//! The integration layer that wires the link graph, stake ledger, and
//! score engine behind one typed call surface. This crate provides the
//! concrete collaborators the core engines treat as interfaces: an
//! in-memory custody vault, a post registry with fee-charged creation, the
//! configured policies, and a period clock - plus a background worker that
//! sweeps settlement across all posts.
//!
//! Claim and link *content* is out of scope: the registry assigns
//! identifiers and records post kinds, nothing more.
//!
//! # Examples
//!
//! ```
//! use verisphere_domain::{AccountId, Side};
//! use verisphere_market::{ManualClock, Market, MarketConfig};
//!
//! let mut market = Market::with_clock(
//!     MarketConfig::default_test_config(),
//!     ManualClock::default(),
//! )
//! .unwrap();
//!
//! let alice = AccountId::from_value(1);
//! market.vault_mut().fund(alice, 10_000);
//!
//! let claim = market.create_claim(alice).unwrap();
//! market.stake(alice, claim, Side::Support, 500).unwrap();
//!
//! market.clock_mut().advance(3);
//! market.update_post(claim).unwrap();
//! assert!(market.effective_score(claim).unwrap().raw() > 0);
//! ```

#![warn(missing_docs)]

mod clock;
mod config;
mod error;
mod market;
mod policy;
mod registry;
mod vault;
mod worker;

pub use clock::{ManualClock, SystemPeriodClock};
pub use config::{ConfigError, MarketConfig};
pub use error::MarketError;
pub use market::Market;
pub use policy::{FixedActivity, FixedFee, FixedRateBand};
pub use registry::PostRegistry;
pub use vault::{Vault, VaultError};
pub use worker::SettlementWorker;
