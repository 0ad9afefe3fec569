//! Token ledger and seigniorage beneficiary
//!
//! Balances are plain `f64` quantities keyed by opaque string identifiers;
//! the supply is always the sum over current balances.

pub mod beneficiary;
pub mod error;
pub mod ledger;

pub use beneficiary::Beneficiary;
pub use error::{Result, TokenError};
pub use ledger::Token;
