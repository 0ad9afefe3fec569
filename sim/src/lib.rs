//! Monte-Carlo simulation harness for the curvemint core
//!
//! Generates randomized demand, drives an auction launch followed by a
//! trading phase against the continuous mint, and records a time series of
//! observable quotes after every step.

pub mod bidders;
pub mod error;
pub mod simulation;
pub mod ticker;

pub use bidders::{gen_bids, Bid, DemandParams};
pub use error::{Result, SimError};
pub use simulation::{Simulation, TradingParams};
pub use ticker::Tick;
