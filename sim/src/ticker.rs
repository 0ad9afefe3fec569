//! Time-series observation records

use serde::{Deserialize, Serialize};

/// One sample of the observable quotes, keyed by simulated time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub time: f64,
    pub sale_price: f64,
    pub purchase_price: f64,
    pub mktcap: f64,
    pub valuation: f64,
    pub max_mktcap: f64,
    pub max_valuation: f64,
    pub reserve: f64,
    pub reserve_based_price: f64,
    pub supply: f64,
    pub reserve_based_supply: f64,
    pub auction_price: f64,
    pub spread: f64,
    /// Exchange price of the trading-phase random walk, absent during the
    /// auction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_price: Option<f64>,
}
