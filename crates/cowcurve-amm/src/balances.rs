//! Token balance source.
//!
//! The AMM never moves tokens. It only reads what it holds, before and after
//! the settlement engine moves them, through [`TokenBalances`].

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use cowcurve_types::{CowCurveError, Result};

/// Authoritative, uncached read of the AMM's own token balances.
pub trait TokenBalances {
    fn balance_of(&self, token: Address) -> U256;
}

/// In-memory ledger for hosts and tests that simulate settlement transfers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBalances {
    balances: HashMap<Address, U256>,
}

impl InMemoryBalances {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase the balance of `token`.
    ///
    /// # Errors
    /// Returns [`CowCurveError::ArithmeticFault`] on overflow.
    pub fn credit(&mut self, token: Address, amount: U256) -> Result<()> {
        let entry = self.balances.entry(token).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| CowCurveError::arithmetic("balance overflow"))?;
        Ok(())
    }

    /// Decrease the balance of `token`.
    ///
    /// # Errors
    /// Returns [`CowCurveError::ArithmeticFault`] if the balance is too low.
    /// The balance is unchanged on error.
    pub fn debit(&mut self, token: Address, amount: U256) -> Result<()> {
        let current = self.balance_of(token);
        let next = current
            .checked_sub(amount)
            .ok_or_else(|| CowCurveError::arithmetic("balance underflow"))?;
        self.balances.insert(token, next);
        Ok(())
    }
}

impl TokenBalances for InMemoryBalances {
    fn balance_of(&self, token: Address) -> U256 {
        self.balances.get(&token).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Address {
        Address::repeat_byte(0x10)
    }

    #[test]
    fn unknown_token_is_zero() {
        let ledger = InMemoryBalances::new();
        assert_eq!(ledger.balance_of(token()), U256::ZERO);
    }

    #[test]
    fn credit_and_debit() {
        let mut ledger = InMemoryBalances::new();
        ledger.credit(token(), U256::from(100u64)).unwrap();
        ledger.debit(token(), U256::from(40u64)).unwrap();
        assert_eq!(ledger.balance_of(token()), U256::from(60u64));
    }

    #[test]
    fn overdraft_rejected_without_change() {
        let mut ledger = InMemoryBalances::new();
        ledger.credit(token(), U256::from(10u64)).unwrap();
        let err = ledger.debit(token(), U256::from(11u64)).unwrap_err();
        assert!(matches!(err, CowCurveError::ArithmeticFault { .. }));
        assert_eq!(ledger.balance_of(token()), U256::from(10u64));
    }

    #[test]
    fn credit_overflow_rejected() {
        let mut ledger = InMemoryBalances::new();
        ledger.credit(token(), U256::MAX).unwrap();
        assert!(ledger.credit(token(), U256::from(1u8)).is_err());
    }
}
