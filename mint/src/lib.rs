//! Two-phase token issuance: reverse Dutch auction, then a continuous
//! bonding-curve market maker
//!
//! The [`Mint`] owns a [`Token`](curvemint_token::Token) ledger, a
//! [`PriceSupplyCurve`](curvemint_curve::PriceSupplyCurve) and an
//! [`Auction`]. While the auction runs, all primary demand goes through
//! [`Mint::order`]; the closing order finalizes the auction exactly once
//! and issues the accumulated orders pro rata. Afterwards [`Mint::buy`]
//! and [`Mint::sell`] trade continuously against the curve.

pub mod auction;
pub mod error;
pub mod mint;

pub use auction::{Auction, MintView};
pub use error::{MintError, Result};
pub use mint::{Mint, OrderReceipt};
