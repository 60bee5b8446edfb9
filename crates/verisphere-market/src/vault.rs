//! In-memory custody of the backing asset

use std::collections::HashMap;
use thiserror::Error;
use verisphere_domain::traits::AssetCustody;
use verisphere_domain::AccountId;

/// Errors from vault operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
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

/// Reference implementation of the custody contract
///
/// Tracks free balances per account, the ledger's custody pool, and total
/// supply. Production deployments replace this with an adapter over a real
/// asset ledger; the engines only ever see the [`AssetCustody`] trait.
#[derive(Debug, Clone, Default)]
pub struct Vault {
    balances: HashMap<AccountId, u64>,
    custody: u64,
    supply: u64,
}

impl Vault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue `amount` of new supply into an account's free balance
    pub fn fund(&mut self, account: AccountId, amount: u64) {
        *self.balances.entry(account).or_insert(0) += amount;
        self.supply += amount;
    }

    /// An account's free balance
    pub fn balance(&self, account: AccountId) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Total asset supply: free balances plus custody
    pub fn total_supply(&self) -> u64 {
        self.supply
    }
}

impl AssetCustody for Vault {
    type Error = VaultError;

    fn transfer_in(&mut self, from: AccountId, amount: u64) -> Result<(), Self::Error> {
        let balance = self.balances.entry(from).or_insert(0);
        if *balance < amount {
            return Err(VaultError::InsufficientFunds {
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
            return Err(VaultError::InsufficientCustody {
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
        self.supply += amount;
        Ok(())
    }

    fn burn(&mut self, amount: u64) -> Result<(), Self::Error> {
        if self.custody < amount {
            return Err(VaultError::InsufficientCustody {
                held: self.custody,
                requested: amount,
            });
        }
        self.custody -= amount;
        self.supply -= amount;
        Ok(())
    }

    fn custody_balance(&self) -> u64 {
        self.custody
    }
}
