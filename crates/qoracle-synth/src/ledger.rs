//! Token ledger boundary.
//!
//! The real keyed balance store belongs to the host contract. The token logic
//! only needs to read and overwrite one balance at a time.

use std::collections::BTreeMap;

use qoracle_types::AccountId;

/// Keyed balance storage.
pub trait TokenLedger {
    /// Balance of `owner`; zero for unknown accounts.
    fn balance_of(&self, owner: &AccountId) -> u64;

    /// Overwrite the balance of `owner`.
    fn set_balance(&mut self, owner: &AccountId, amount: u64);
}

/// In-memory ledger. Zero balances are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceMap {
    balances: BTreeMap<AccountId, u64>,
}

impl BalanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts with a non-zero balance.
    pub fn holders(&self) -> usize {
        self.balances.len()
    }
}

impl TokenLedger for BalanceMap {
    fn balance_of(&self, owner: &AccountId) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn set_balance(&mut self, owner: &AccountId, amount: u64) {
        if amount == 0 {
            self.balances.remove(owner);
        } else {
            self.balances.insert(*owner, amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_account_is_zero() {
        let ledger = BalanceMap::new();
        assert_eq!(ledger.balance_of(&[1u8; 32]), 0);
    }

    #[test]
    fn test_set_and_clear() {
        let mut ledger = BalanceMap::new();
        ledger.set_balance(&[1u8; 32], 500);
        assert_eq!(ledger.balance_of(&[1u8; 32]), 500);
        assert_eq!(ledger.holders(), 1);

        ledger.set_balance(&[1u8; 32], 0);
        assert_eq!(ledger.balance_of(&[1u8; 32]), 0);
        assert_eq!(ledger.holders(), 0);
    }
}
