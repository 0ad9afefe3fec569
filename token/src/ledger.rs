//! Balance ledger

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, TokenError};

/// Mapping from account identifier to non-negative balance. Ordered so
/// that summing the supply is deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Token {
    accounts: BTreeMap<String, f64>,
}

impl Token {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total supply, recomputed from the balances on every read.
    pub fn supply(&self) -> f64 {
        self.accounts.values().sum()
    }

    pub fn balance_of(&self, address: &str) -> f64 {
        self.accounts.get(address).copied().unwrap_or(0.0)
    }

    /// Credits `amount` to `recipient`, creating the account if needed.
    pub fn issue(&mut self, amount: f64, recipient: &str) -> Result<()> {
        if amount < 0.0 {
            return Err(TokenError::NegativeAmount(amount));
        }
        *self.accounts.entry(recipient.to_string()).or_insert(0.0) += amount;
        Ok(())
    }

    /// Removes `amount` from `owner`'s balance.
    ///
    /// Fails without mutating the ledger when the balance does not cover
    /// the requested amount.
    pub fn destroy(&mut self, amount: f64, owner: &str) -> Result<()> {
        if amount < 0.0 {
            return Err(TokenError::NegativeAmount(amount));
        }
        let available = self.balance_of(owner);
        if available < amount {
            return Err(TokenError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        if let Some(balance) = self.accounts.get_mut(owner) {
            *balance -= amount;
        }
        Ok(())
    }

    /// Moves `value` from one account to another, atomically.
    pub fn transfer(&mut self, from: &str, to: &str, value: f64) -> Result<()> {
        if value < 0.0 {
            return Err(TokenError::NegativeAmount(value));
        }
        let available = self.balance_of(from);
        if available < value {
            return Err(TokenError::InsufficientFunds {
                requested: value,
                available,
            });
        }
        if let Some(balance) = self.accounts.get_mut(from) {
            *balance -= value;
        }
        *self.accounts.entry(to.to_string()).or_insert(0.0) += value;
        Ok(())
    }

    /// Number of accounts that have ever held a balance.
    pub fn holders(&self) -> usize {
        self.accounts.len()
    }
}
