//! Minimal in-memory custody for examples and tests
//!
//! Production deployments implement [`AssetCustody`] against a real asset
//! ledger; this vault exists so the engines can be exercised without one.

use std::collections::HashMap;
use thiserror::Error;
use verisphere_domain::traits::AssetCustody;
use verisphere_domain::AccountId;

/// Errors from the test vault
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestVaultError {
    /// The account cannot cover the transfer
    #[error("Insufficient funds: account {account} has {available}, needs {requested}")]
    InsufficientFunds {
        /// The account that came up short
        account: AccountId,
        /// Its free balance
        available: u64,
        /// The requested amount
        requested: u64,
    },

    /// Custody cannot cover the release or burn
    #[error("Insufficient custody: held {held}, needs {requested}")]
    InsufficientCustody {
        /// Current custody pool
        held: u64,
        /// The requested amount
        requested: u64,
    },
}

/// In-memory asset custody: free balances plus a custody pool
#[derive(Debug, Clone, Default)]
pub struct TestVault {
    balances: HashMap<AccountId, u64>,
    custody: u64,
}

impl TestVault {
    /// A vault with one pre-funded account
    pub fn with_balance(account: AccountId, amount: u64) -> Self {
        let mut vault = Self::default();
        vault.credit(account, amount);
        vault
    }

    /// Credit an account's free balance
    pub fn credit(&mut self, account: AccountId, amount: u64) {
        *self.balances.entry(account).or_insert(0) += amount;
    }

    /// An account's free balance
    pub fn balance(&self, account: AccountId) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }
}

impl AssetCustody for TestVault {
    type Error = TestVaultError;

    fn transfer_in(&mut self, from: AccountId, amount: u64) -> Result<(), Self::Error> {
        let balance = self.balances.entry(from).or_insert(0);
        if *balance < amount {
            return Err(TestVaultError::InsufficientFunds {
                account: from,
                available: *balance,
                requested: amount,
            });
        }
        *balance -= amount;
        self.custody += amount;
        Ok(())
    }

    fn transfer_out(&mut self, to: AccountId, amount: u64) -> Result<(), Self::Error> {
        if self.custody < amount {
            return Err(TestVaultError::InsufficientCustody {
                held: self.custody,
                requested: amount,
            });
        }
        self.custody -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    fn mint(&mut self, amount: u64) -> Result<(), Self::Error> {
        self.custody += amount;
        Ok(())
    }

    fn burn(&mut self, amount: u64) -> Result<(), Self::Error> {
        if self.custody < amount {
            return Err(TestVaultError::InsufficientCustody {
                held: self.custody,
                requested: amount,
            });
        }
        self.custody -= amount;
        Ok(())
    }

    fn custody_balance(&self) -> u64 {
        self.custody
    }
}
