//! Ledger error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(f64),

    #[error("issuance fraction must be in [0, 1), got {0}")]
    InvalidFraction(f64),
}

pub type Result<T> = std::result::Result<T, TokenError>;
