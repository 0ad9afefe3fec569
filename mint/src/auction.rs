//! Reverse Dutch auction
//!
//! The offered price decays as `factor / (elapsed + offset)` while orders
//! accumulate into the auction's own reserve pool. Once the pool covers the
//! curve-implied reserve target at the current price, the owning mint
//! finalizes the auction and issues the accumulated orders pro rata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use curvemint_curve::PriceSupplyCurve;
use curvemint_token::Beneficiary;

use crate::error::{MintError, Result};

/// Read-only snapshot of the owning mint's state.
///
/// The auction never holds a reference back to its mint; the mint passes
/// this view into every pricing call instead.
#[derive(Debug, Clone, Copy)]
pub struct MintView<'a> {
    pub curve: &'a PriceSupplyCurve,
    pub beneficiary: &'a Beneficiary,
    pub mint_reserve: f64,
    pub token_supply: f64,
}

/// Time-decaying price discovery and order book for the launch phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    factor: f64,
    offset: f64,
    elapsed: f64,
    reserve: f64,
    orders: BTreeMap<String, f64>,
    ended: bool,
    final_price: f64,
}

impl Auction {
    /// Creates a running auction with price `factor / (elapsed + offset)`.
    /// Both parameters must be positive so the price starts finite and
    /// strictly decreases.
    pub fn new(factor: f64, offset: f64) -> Result<Self> {
        if !(factor > 0.0) || !(offset > 0.0) {
            return Err(MintError::InvalidAuctionParams { factor, offset });
        }
        Ok(Self {
            factor,
            offset,
            elapsed: 0.0,
            reserve: 0.0,
            orders: BTreeMap::new(),
            ended: false,
            final_price: 0.0,
        })
    }

    /// Offered price at the current elapsed time.
    pub fn price(&self) -> f64 {
        self.factor / (self.elapsed + self.offset)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advances the externally driven clock. Time only moves forward.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        if dt < 0.0 {
            return Err(MintError::NegativeTimeStep(dt));
        }
        self.elapsed += dt;
        Ok(())
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Price the auction closed at; 0 while it is still running.
    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    /// Capital collected during the auction phase. Drained into the mint
    /// at finalization.
    pub fn reserve(&self) -> f64 {
        self.reserve
    }

    /// Accumulated contribution per buyer.
    pub fn orders(&self) -> &BTreeMap<String, f64> {
        &self.orders
    }

    /// Supply the curve would carry if the auction closed at the current
    /// price, net of the seigniorage carve-out. A net price at or below
    /// the curve floor maps to zero.
    pub fn projected_supply(&self, view: &MintView<'_>) -> f64 {
        let net_price = self.price() * (1.0 - view.beneficiary.fraction());
        view.curve.supply_at_price(net_price).unwrap_or(0.0)
    }

    /// Shortfall between the reserve target at the current price and the
    /// capital collected so far (mint reserve included), clamped at 0.
    pub fn missing_reserve(&self, view: &MintView<'_>) -> f64 {
        let target = view.curve.reserve(self.projected_supply(view));
        (target - view.mint_reserve - self.reserve).max(0.0)
    }

    /// Projected pooled redemption floor if the auction closed now.
    pub fn bid(&self, view: &MintView<'_>) -> f64 {
        let supply = self.projected_supply(view);
        if supply <= 0.0 {
            return 0.0;
        }
        view.curve.reserve(supply) / supply
    }

    /// Market cap if the auction closed at the current price.
    pub fn max_mktcap(&self, view: &MintView<'_>) -> f64 {
        self.price() * self.projected_supply(view)
    }

    /// Valuation (market cap in excess of the reserve) if the auction
    /// closed at the current price.
    pub fn max_valuation(&self, view: &MintView<'_>) -> f64 {
        let supply = self.projected_supply(view);
        self.price() * supply - view.curve.reserve(supply)
    }

    pub(crate) fn accumulate(&mut self, recipient: &str, value: f64) {
        *self.orders.entry(recipient.to_string()).or_insert(0.0) += value;
        self.reserve += value;
    }

    /// Hands the collected pool to the mint, zeroing it locally.
    pub(crate) fn take_reserve(&mut self) -> f64 {
        std::mem::take(&mut self.reserve)
    }

    pub(crate) fn mark_ended(&mut self, final_price: f64) {
        self.ended = true;
        self.final_price = final_price;
    }
}
