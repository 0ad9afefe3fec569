//! Bonding-curve algebra
//!
//! Maps token supply to price and to the cumulative reserve required to
//! reach that supply, with closed-form inverses in both directions.

pub mod approx;
pub mod curve;
pub mod error;

pub use approx::{approx_eq, approx_eq_tol, DEFAULT_TOLERANCE};
pub use curve::PriceSupplyCurve;
pub use error::{CurveError, Result};
