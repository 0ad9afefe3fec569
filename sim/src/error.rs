//! Simulation error types

use curvemint_curve::CurveError;
use curvemint_mint::MintError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Mint(#[from] MintError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("invalid demand parameters: {0}")]
    InvalidDemand(String),

    #[error("auction did not close; increase the total order value")]
    AuctionNotClosed,
}

pub type Result<T> = std::result::Result<T, SimError>;
