//! Verisphere Stake Ledger
//!
//! Records per-post, per-side staked lots and applies the periodic
//! growth/decay settlement that mints to winners and burns from losers.
//!
//! The ledger is an explicit state handle: side queues, the global ceiling
//! `s_max`, and the settlement configuration all live on [`StakeLedger`].
//! The backing asset moves only through the [`AssetCustody`] collaborator,
//! passed into each mutating call, and custody of the asset always equals
//! the sum of all live lot amounts between calls.
//!
//! # Examples
//!
//! ```
//! use verisphere_domain::{AccountId, PostId, Side};
//! use verisphere_ledger::{LedgerConfig, StakeLedger};
//! # use verisphere_ledger::testkit::TestVault;
//!
//! let mut ledger = StakeLedger::new(LedgerConfig::default());
//! let mut vault = TestVault::with_balance(AccountId::from_value(1), 1_000);
//!
//! ledger
//!     .stake(
//!         &mut vault,
//!         AccountId::from_value(1),
//!         PostId::from_value(7),
//!         Side::Support,
//!         400,
//!         0,
//!     )
//!     .unwrap();
//! assert_eq!(ledger.totals(PostId::from_value(7)), (400, 0));
//! ```
//!
//! [`AssetCustody`]: verisphere_domain::traits::AssetCustody

#![warn(missing_docs)]

mod config;
mod error;
mod ledger;
mod queue;
mod settlement;

pub mod testkit;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use ledger::StakeLedger;
pub use queue::SideQueue;
pub use settlement::Settlement;
