//! Curve domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("invalid curve parameters: base_price {base_price}, slope {slope}")]
    InvalidParams { base_price: f64, slope: f64 },

    #[error("reserve must be non-negative, got {0}")]
    NegativeReserve(f64),

    #[error("price {price} is below the curve base price {base_price}")]
    PriceBelowBase { price: f64, base_price: f64 },
}

pub type Result<T> = std::result::Result<T, CurveError>;
