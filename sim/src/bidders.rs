//! Monte-Carlo demand generation
//!
//! Order sizes follow a Pareto distribution normalized to a configured
//! total; private valuations are normally distributed. Bids are sorted by
//! descending valuation so the most eager buyer is always first.

use rand::Rng;
use rand_distr::{Distribution, Normal, Pareto};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// One unit of external demand: capital offered and the private valuation
/// above which the bidder holds off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: String,
    pub value: f64,
    pub valuation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandParams {
    pub num_bidders: usize,
    pub total_purchase_amount: f64,
    pub median_valuation: f64,
    pub std_deviation: f64,
}

impl Default for DemandParams {
    fn default() -> Self {
        Self {
            num_bidders: 300,
            total_purchase_amount: 20e6,
            median_valuation: 5e6,
            std_deviation: 0.25 * 5e6,
        }
    }
}

/// Draws a population of bids and normalizes the order sizes so they sum
/// to `total_purchase_amount`.
pub fn gen_bids<R: Rng>(rng: &mut R, params: &DemandParams) -> Result<Vec<Bid>> {
    if params.num_bidders == 0 || params.total_purchase_amount <= 0.0 {
        return Err(SimError::InvalidDemand(format!(
            "need a positive bidder count and purchase amount, got {} and {}",
            params.num_bidders, params.total_purchase_amount
        )));
    }
    let pareto = Pareto::new(1.0, 2.0)
        .map_err(|e| SimError::InvalidDemand(format!("order size distribution: {e}")))?;
    let normal = Normal::new(params.median_valuation, params.std_deviation)
        .map_err(|e| SimError::InvalidDemand(format!("valuation distribution: {e}")))?;

    let mut bids: Vec<Bid> = (0..params.num_bidders)
        .map(|i| Bid {
            bidder: format!("bidder-{i:04}"),
            value: pareto.sample(rng),
            valuation: normal.sample(rng),
        })
        .collect();

    let drawn_total: f64 = bids.iter().map(|b| b.value).sum();
    let scale = params.total_purchase_amount / drawn_total;
    for bid in &mut bids {
        bid.value *= scale;
    }
    bids.sort_by(|a, b| b.valuation.total_cmp(&a.valuation));
    Ok(bids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_bids_are_normalized_and_sorted() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let params = DemandParams {
            num_bidders: 100,
            total_purchase_amount: 1_000_000.0,
            median_valuation: 5e6,
            std_deviation: 1e6,
        };
        let bids = gen_bids(&mut rng, &params).unwrap();
        assert_eq!(bids.len(), 100);

        let total: f64 = bids.iter().map(|b| b.value).sum();
        assert!((total - 1_000_000.0).abs() / 1_000_000.0 < 1e-9);
        assert!(bids.windows(2).all(|w| w[0].valuation >= w[1].valuation));
        assert!(bids.iter().all(|b| b.value > 0.0));
    }

    #[test]
    fn test_same_seed_same_bids() {
        let params = DemandParams::default();
        let a = gen_bids(&mut ChaCha8Rng::seed_from_u64(7), &params).unwrap();
        let b = gen_bids(&mut ChaCha8Rng::seed_from_u64(7), &params).unwrap();
        assert_eq!(a.len(), b.len());
        assert!(a
            .iter()
            .zip(&b)
            .all(|(x, y)| x.value == y.value && x.valuation == y.valuation));
    }

    #[test]
    fn test_rejects_empty_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let params = DemandParams {
            num_bidders: 0,
            ..DemandParams::default()
        };
        assert!(matches!(
            gen_bids(&mut rng, &params),
            Err(SimError::InvalidDemand(_))
        ));
    }
}
