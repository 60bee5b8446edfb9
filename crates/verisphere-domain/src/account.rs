//! Account identity for stakers and beneficiaries

use std::fmt;

/// Opaque identity of a participant holding or staking the backing asset
///
/// The core never interprets account identity; it is carried through to the
/// asset custody collaborator verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(u64);

impl AccountId {
    /// Create an AccountId from a raw u64 value
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw u64 value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_roundtrip() {
        let id = AccountId::from_value(7);
        assert_eq!(id.value(), 7);
        assert_eq!(id.to_string(), "account:7");
    }
}
