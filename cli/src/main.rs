//! curvemint binary
//!
//! Runs a seeded launch-auction and trading simulation against the
//! continuous mint and prints a summary; optionally dumps the tick series
//! as JSON for plotting.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use curvemint_curve::PriceSupplyCurve;
use curvemint_mint::{Auction, Mint};
use curvemint_sim::{gen_bids, DemandParams, Simulation, TradingParams};
use curvemint_token::Beneficiary;

#[derive(Debug, Parser)]
#[command(name = "curvemint", about = "Bonding-curve mint and reverse-auction simulator")]
struct Args {
    /// RNG seed for demand generation and the trading walk
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of simulated bidders
    #[arg(long, default_value_t = 300)]
    num_bidders: usize,

    /// Total capital the bidder population brings
    #[arg(long, default_value_t = 20e6)]
    total_purchase_amount: f64,

    /// Median of the bidders' private valuations
    #[arg(long, default_value_t = 5e6)]
    median_valuation: f64,

    /// Valuation standard deviation as a fraction of the median
    #[arg(long, default_value_t = 0.25)]
    valuation_spread: f64,

    /// Curve price at zero supply
    #[arg(long, default_value_t = 1.0)]
    base_price: f64,

    /// Curve price increase per unit of supply
    #[arg(long, default_value_t = 1e-6)]
    slope: f64,

    /// Beneficiary share of every issuance, in [0, 1)
    #[arg(long, default_value_t = 0.2)]
    fraction: f64,

    /// Auction price numerator: price = factor / (elapsed + offset)
    #[arg(long, default_value_t = 1e6)]
    auction_factor: f64,

    /// Auction price denominator offset
    #[arg(long, default_value_t = 1e3)]
    auction_offset: f64,

    /// Simulated time per step
    #[arg(long, default_value_t = 10.0)]
    step: f64,

    /// Trading horizon as a multiple of the auction duration
    #[arg(long, default_value_t = 3.0)]
    horizon_factor: f64,

    /// Standard deviation of the trading-phase price walk
    #[arg(long, default_value_t = 0.005)]
    walk_stddev: f64,

    /// Trading price target as a multiple of the post-auction ask
    #[arg(long, default_value_t = 1.2)]
    target_price_factor: f64,

    /// Write the tick series as JSON to this path
    #[arg(long)]
    ticker_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let curve = PriceSupplyCurve::new(args.base_price, args.slope)?;
    let beneficiary = Beneficiary::new("beneficiary", args.fraction)?;
    let auction = Auction::new(args.auction_factor, args.auction_offset)?;
    let mint = Mint::new(curve, beneficiary, auction);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let demand = DemandParams {
        num_bidders: args.num_bidders,
        total_purchase_amount: args.total_purchase_amount,
        median_valuation: args.median_valuation,
        std_deviation: args.valuation_spread * args.median_valuation,
    };
    let bids = gen_bids(&mut rng, &demand)?;
    println!(
        "demand: {} bidders, {:.0} total, valuations {:.0}..{:.0}",
        bids.len(),
        args.total_purchase_amount,
        bids.last().map(|b| b.valuation).unwrap_or(0.0),
        bids.first().map(|b| b.valuation).unwrap_or(0.0),
    );

    let mut sim = Simulation::new(mint, bids, args.step);

    sim.run_auction().context("auction phase")?;
    println!(
        "auction closed at price {:.4} after {:.0} time units ({} bids left unfilled)",
        sim.mint().auction().final_price(),
        sim.mint().auction().elapsed(),
        sim.pending_bids(),
    );
    println!(
        "  supply {:.0}, reserve {:.0}, {} holders",
        sim.mint().token().supply(),
        sim.mint().reserve(),
        sim.mint().token().holders(),
    );

    let trading = TradingParams {
        horizon_factor: args.horizon_factor,
        stddev: args.walk_stddev,
        final_price_factor: args.target_price_factor,
    };
    sim.run_trading(&mut rng, &trading).context("trading phase")?;
    sim.mint().check_invariants()?;

    let mint = sim.mint();
    println!(
        "final: ask {:.4}, bid {:.4}, mktcap {:.0}, valuation {:.0}, supply {:.0}, reserve {:.0}",
        mint.ask()?,
        mint.bid(),
        mint.mktcap()?,
        mint.valuation()?,
        mint.token().supply(),
        mint.reserve(),
    );
    println!("recorded {} ticks", sim.ticker().len());

    if let Some(path) = args.ticker_out {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, sim.ticker())?;
        println!("wrote ticker to {}", path.display());
    }
    Ok(())
}
