//! Mint error types
//!
//! Recoverable domain errors (ledger failures, rejected requests) are kept
//! apart from the fatal [`MintError::Invariant`] kind, which signals a
//! broken model rather than a bad request.

use curvemint_curve::CurveError;
use curvemint_token::TokenError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MintError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("auction has already ended")]
    AuctionEnded,

    #[error("auction is still running")]
    AuctionActive,

    #[error("invalid auction parameters: factor {factor}, offset {offset}")]
    InvalidAuctionParams { factor: f64, offset: f64 },

    #[error("value must be non-negative, got {0}")]
    NegativeValue(f64),

    #[error("time must not move backwards, got step {0}")]
    NegativeTimeStep(f64),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, MintError>;
