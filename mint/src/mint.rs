//! Continuous bonding-curve market maker with an auction launch phase

use serde::{Deserialize, Serialize};

use curvemint_curve::{approx_eq, PriceSupplyCurve};
use curvemint_token::{Beneficiary, Token};

use crate::auction::{Auction, MintView};
use crate::error::{MintError, Result};

/// Outcome of a single auction order.
///
/// Value beyond the reserve still missing at the current price is refused
/// and reported back as `refunded`; it never enters the order book or any
/// reserve pool, so custody stays with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub accepted: f64,
    pub refunded: f64,
    /// True when this order triggered auction finalization.
    pub closed: bool,
}

/// Orchestrates curve, ledger, beneficiary and auction.
///
/// Pricing authority sits with the auction until it ends, then with the
/// curve: [`Mint::order`] is the only issuance path during the auction,
/// [`Mint::buy`]/[`Mint::sell`] afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mint {
    curve: PriceSupplyCurve,
    beneficiary: Beneficiary,
    auction: Auction,
    token: Token,
    reserve: f64,
}

impl Mint {
    pub fn new(curve: PriceSupplyCurve, beneficiary: Beneficiary, auction: Auction) -> Self {
        Self {
            curve,
            beneficiary,
            auction,
            token: Token::new(),
            reserve: 0.0,
        }
    }

    /// Like [`Mint::new`] but with a founder pre-allocation, backed by a
    /// starting reserve of exactly `curve.reserve(premine)` so the
    /// reserve/supply round-trip holds from construction.
    pub fn with_premine(
        curve: PriceSupplyCurve,
        beneficiary: Beneficiary,
        auction: Auction,
        premine: f64,
        founder: &str,
    ) -> Result<Self> {
        let mut mint = Self::new(curve, beneficiary, auction);
        mint.token.issue(premine, founder)?;
        mint.reserve = curve.reserve(premine);
        Ok(mint)
    }

    pub fn curve(&self) -> &PriceSupplyCurve {
        &self.curve
    }

    pub fn beneficiary(&self) -> &Beneficiary {
        &self.beneficiary
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Continuous-phase reserve. Only credited by auction finalization and
    /// by [`Mint::buy`].
    pub fn reserve(&self) -> f64 {
        self.reserve
    }

    /// Continuous-phase and auction-phase pools combined.
    pub fn combined_reserve(&self) -> f64 {
        self.reserve + self.auction.reserve()
    }

    pub fn is_auction(&self) -> bool {
        !self.auction.ended()
    }

    /// Advances the simulated clock shared with the auction.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        self.auction.advance(dt)
    }

    fn view(&self) -> MintView<'_> {
        MintView {
            curve: &self.curve,
            beneficiary: &self.beneficiary,
            mint_reserve: self.reserve,
            token_supply: self.token.supply(),
        }
    }

    // auction-phase entry points

    /// Submits a bid at the current auction price.
    ///
    /// Accepts at most the reserve still missing at the current price; the
    /// rest is refunded via the receipt. The order that covers the full
    /// shortfall finalizes the auction before returning.
    pub fn order(&mut self, recipient: &str, value: f64) -> Result<OrderReceipt> {
        if !self.is_auction() {
            return Err(MintError::AuctionEnded);
        }
        if value < 0.0 {
            return Err(MintError::NegativeValue(value));
        }
        let missing = self.auction.missing_reserve(&self.view());
        let accepted = value.min(missing);
        let refunded = value - accepted;
        self.auction.accumulate(recipient, accepted);
        log::debug!(
            "order from {recipient}: accepted {accepted:.2}, refunded {refunded:.2} at price {:.4}",
            self.auction.price()
        );
        let closed = value >= missing && self.auction.reserve() > 0.0;
        if closed {
            self.finalize_auction()?;
        }
        Ok(OrderReceipt {
            accepted,
            refunded,
            closed,
        })
    }

    /// One-shot transition from the auction phase to continuous trading.
    ///
    /// Issues the curve-implied supply increment pro rata over all buyers,
    /// drains the auction pool into the mint reserve and checks the
    /// reserve/supply round-trip.
    fn finalize_auction(&mut self) -> Result<()> {
        if self.auction.ended() {
            return Err(MintError::Invariant("auction finalized twice".into()));
        }
        let auction_reserve = self.auction.reserve();
        if auction_reserve <= 0.0 {
            return Err(MintError::Invariant(
                "auction finalized with an empty reserve".into(),
            ));
        }
        let final_price = self.auction.price();
        let combined = self.reserve + auction_reserve;
        let total_issuance = self.curve.supply(combined)? - self.token.supply();

        // shares sum to total_issuance by construction
        let orders: Vec<(String, f64)> = self
            .auction
            .orders()
            .iter()
            .map(|(buyer, value)| (buyer.clone(), *value))
            .collect();
        for (buyer, value) in orders {
            let share = total_issuance * value / auction_reserve;
            self.issue_with_seigniorage(share, &buyer)?;
        }

        self.reserve += self.auction.take_reserve();
        self.auction.mark_ended(final_price);

        ensure_approx(
            "reserve backs supply after finalization",
            self.curve.reserve(self.token.supply()),
            self.reserve,
        )?;
        ensure_approx(
            "supply matches reserve after finalization",
            self.token.supply(),
            self.curve.supply(self.reserve)?,
        )?;
        log::info!(
            "auction closed at price {final_price:.4}: issued {total_issuance:.0} against reserve {:.0}",
            self.reserve
        );
        Ok(())
    }

    // continuous-phase entry points

    /// Mints against the curve for `value` of new reserve. Returns the
    /// amount credited to the buyer net of seigniorage.
    pub fn buy(&mut self, value: f64, recipient: &str) -> Result<f64> {
        if self.is_auction() {
            return Err(MintError::AuctionActive);
        }
        if value < 0.0 {
            return Err(MintError::NegativeValue(value));
        }
        let supply = self.curve.supply(self.reserve)?;
        let issued = self.curve.issued(supply, value)?;
        self.reserve += value;
        let sold = self.issue_with_seigniorage(issued, recipient)?;
        log::debug!("buy of {value:.2} by {recipient}: credited {sold:.4}");
        Ok(sold)
    }

    /// Redeems `num` units against the pooled reserve, pro rata rather
    /// than at the marginal curve price, so the redemption price never
    /// exceeds the ask. Returns the value paid out.
    pub fn sell(&mut self, num: f64, owner: &str) -> Result<f64> {
        if self.is_auction() {
            return Err(MintError::AuctionActive);
        }
        if num < 0.0 {
            return Err(MintError::NegativeValue(num));
        }
        let supply = self.token.supply();
        let value = if supply > 0.0 {
            self.reserve * num / supply
        } else {
            0.0
        };
        self.token.destroy(num, owner)?;
        // guard against residual floating-point overshoot
        let value = value.min(self.reserve);
        self.reserve -= value;
        log::debug!("sell of {num:.4} by {owner}: paid out {value:.2}");
        Ok(value)
    }

    /// Sole issuance path: splits `num_issued` gross units between the
    /// recipient and the beneficiary account.
    fn issue_with_seigniorage(&mut self, num_issued: f64, recipient: &str) -> Result<f64> {
        let num_sold = num_issued / self.beneficiary.factor();
        let seigniorage = num_issued - num_sold;
        self.token.issue(num_sold, recipient)?;
        self.token.issue(seigniorage, self.beneficiary.account())?;
        Ok(num_sold)
    }

    // quotes

    /// Marginal price to acquire one more unit. Delegates to the auction
    /// while it runs; afterwards one unit's curve cost grossed up so the
    /// buyer's net amount after seigniorage is a full unit.
    pub fn ask(&self) -> Result<f64> {
        if self.is_auction() {
            return Ok(self.auction.price());
        }
        let supply = self.curve.supply(self.reserve)?;
        Ok(self.curve.cost(supply, self.beneficiary.factor()))
    }

    /// Pro-rata redemption price for one unit; 0 while the auction runs
    /// (redemption is not offered before finalization).
    pub fn bid(&self) -> f64 {
        if self.is_auction() || self.reserve <= 0.0 {
            return 0.0;
        }
        let supply = self.token.supply();
        if supply <= 0.0 {
            return 0.0;
        }
        self.reserve / supply
    }

    pub fn mktcap(&self) -> Result<f64> {
        Ok(self.ask()? * self.token.supply())
    }

    /// Market cap in excess of the backing reserve.
    pub fn valuation(&self) -> Result<f64> {
        Ok((self.mktcap()? - self.reserve).max(0.0))
    }

    // auction quote delegation

    pub fn auction_price(&self) -> f64 {
        self.auction.price()
    }

    pub fn missing_auction_reserve(&self) -> f64 {
        self.auction.missing_reserve(&self.view())
    }

    /// Projected redemption floor if the auction closed at the current
    /// price.
    pub fn auction_bid(&self) -> f64 {
        self.auction.bid(&self.view())
    }

    pub fn max_mktcap(&self) -> f64 {
        self.auction.max_mktcap(&self.view())
    }

    pub fn max_valuation(&self) -> f64 {
        self.auction.max_valuation(&self.view())
    }

    /// Tolerance-checked state invariants: after the auction the reserve
    /// must cover the curve reserve of the outstanding supply, and the
    /// redemption price must not exceed the ask.
    pub fn check_invariants(&self) -> Result<()> {
        if self.is_auction() {
            return Ok(());
        }
        let required = self.curve.reserve(self.token.supply());
        if self.reserve < required && !approx_eq(self.reserve, required) {
            return Err(MintError::Invariant(format!(
                "reserve {} does not cover curve reserve {}",
                self.reserve, required
            )));
        }
        let ask = self.ask()?;
        let bid = self.bid();
        if bid > ask && !approx_eq(bid, ask) {
            return Err(MintError::Invariant(format!("bid {bid} above ask {ask}")));
        }
        Ok(())
    }
}

fn ensure_approx(what: &str, a: f64, b: f64) -> Result<()> {
    if approx_eq(a, b) {
        Ok(())
    } else {
        Err(MintError::Invariant(format!("{what}: {a} vs {b}")))
    }
}
