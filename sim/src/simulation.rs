//! Auction and trading simulation driver
//!
//! Two phases, mirroring the token's lifecycle: drive the reverse auction
//! until it closes by submitting bids whose valuation exceeds the
//! projected valuation, then run a random-walk exchange price against the
//! continuous mint and arbitrage whenever the walk crosses the ask.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use curvemint_mint::{Mint, MintError};

use crate::bidders::Bid;
use crate::error::{Result, SimError};
use crate::ticker::Tick;

/// Trading-phase knobs: how far past the auction to run, the random-walk
/// noise, and the price target relative to the post-auction ask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingParams {
    pub horizon_factor: f64,
    pub stddev: f64,
    pub final_price_factor: f64,
}

impl Default for TradingParams {
    fn default() -> Self {
        Self {
            horizon_factor: 3.0,
            stddev: 0.005,
            final_price_factor: 1.2,
        }
    }
}

/// Drives a [`Mint`] through its launch auction and a trading phase,
/// recording a [`Tick`] after every time step.
#[derive(Debug, Clone)]
pub struct Simulation {
    mint: Mint,
    bids: Vec<Bid>,
    step: f64,
    ticker: Vec<Tick>,
}

impl Simulation {
    pub fn new(mint: Mint, bids: Vec<Bid>, step: f64) -> Self {
        Self {
            mint,
            bids,
            step,
            ticker: Vec::new(),
        }
    }

    pub fn mint(&self) -> &Mint {
        &self.mint
    }

    pub fn ticker(&self) -> &[Tick] {
        &self.ticker
    }

    pub fn into_ticker(self) -> Vec<Tick> {
        self.ticker
    }

    /// Bids not yet submitted.
    pub fn pending_bids(&self) -> usize {
        self.bids.len()
    }

    /// Advances time in fixed steps, submitting each bid once the
    /// projected valuation drops below the bidder's own. Fails if demand
    /// runs out before the auction closes.
    pub fn run_auction(&mut self) -> Result<()> {
        log::info!(
            "starting auction at price {:.2}, projected mktcap {:.0}",
            self.mint.auction_price(),
            self.mint.max_mktcap()
        );
        // bids are sorted by descending valuation, so the head is the only
        // candidate that could still order as the projected valuation decays
        while self.mint.is_auction() && self.bids.first().is_some_and(|b| b.valuation > 0.0) {
            self.mint.advance(self.step)?;
            while self.mint.is_auction() {
                let Some(next) = self.bids.first() else { break };
                if next.valuation <= self.mint.max_valuation() {
                    break;
                }
                let bid = self.bids.remove(0);
                let receipt = self.mint.order(&bid.bidder, bid.value)?;
                log::debug!(
                    "{} ordered {:.0}, accepted {:.0} at valuation {:.0}",
                    bid.bidder,
                    bid.value,
                    receipt.accepted,
                    bid.valuation
                );
            }
            self.record(None)?;
        }
        if self.mint.is_auction() {
            return Err(SimError::AuctionNotClosed);
        }
        Ok(())
    }

    /// Runs a geometric random walk on an exchange price, buying from the
    /// mint whenever the walk crosses the ask, until the target price is
    /// reached or the time horizon passes.
    pub fn run_trading<R: Rng>(&mut self, rng: &mut R, params: &TradingParams) -> Result<()> {
        if self.mint.is_auction() {
            return Err(SimError::Mint(MintError::AuctionActive));
        }
        let start = self.mint.auction().elapsed();
        let max_elapsed = (start * params.horizon_factor).max(start + self.step);
        let final_price = params.final_price_factor * self.mint.ask()?;
        let mut ex_price = self.mint.auction().final_price();
        log::info!("trading from price {ex_price:.4} towards {final_price:.4}");

        let steps = ((max_elapsed - start) / self.step).max(1.0);
        let median = (final_price / ex_price).powf(1.0 / steps);
        let walk = Normal::new(median, params.stddev)
            .map_err(|e| SimError::InvalidDemand(format!("price walk distribution: {e}")))?;

        while ex_price < final_price && self.mint.auction().elapsed() < max_elapsed {
            self.mint.advance(self.step)?;
            ex_price *= walk.sample(rng);
            let ask = self.mint.ask()?;
            if ex_price > ask {
                let added = self.mint.curve().reserve_at_price(ex_price)?
                    - self.mint.curve().reserve_at_price(ask)?;
                let bought = self.mint.buy(added, "market-maker")?;
                log::debug!("arbitrage: {added:.0} of reserve bought {bought:.2} units");
            }
            self.record(Some(ex_price))?;
        }
        Ok(())
    }

    /// Samples every observable quote into the ticker.
    fn record(&mut self, market_price: Option<f64>) -> Result<()> {
        let mint = &self.mint;
        let combined = mint.combined_reserve();
        let ended = !mint.is_auction();
        let ask = mint.ask()?;
        let tick = Tick {
            time: mint.auction().elapsed(),
            sale_price: ask,
            purchase_price: mint.bid(),
            mktcap: mint.mktcap()?,
            valuation: mint.valuation()?,
            max_mktcap: if ended { mint.mktcap()? } else { mint.max_mktcap() },
            max_valuation: if ended {
                mint.valuation()?
            } else {
                mint.max_valuation()
            },
            reserve: combined,
            reserve_based_price: mint.curve().price_at_reserve(combined)?
                * mint.beneficiary().factor(),
            supply: mint.token().supply(),
            reserve_based_supply: mint.curve().supply(combined)?,
            auction_price: mint.auction_price(),
            spread: ask - mint.bid(),
            market_price,
        };
        self.ticker.push(tick);
        Ok(())
    }
}
