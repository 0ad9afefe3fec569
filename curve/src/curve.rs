//! Linear price/supply curve with closed-form inverses

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};

/// Affine bonding curve `price(s) = base_price + slope * s`.
///
/// The reserve is the integral of the price from 0 to the current supply,
/// so every conversion below has a closed form and the pair
/// `supply`/`reserve` round-trips within floating-point error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceSupplyCurve {
    base_price: f64,
    slope: f64,
}

impl PriceSupplyCurve {
    /// Creates a curve with `base_price >= 0` and `slope > 0`.
    pub fn new(base_price: f64, slope: f64) -> Result<Self> {
        if !(base_price >= 0.0) || !(slope > 0.0) {
            return Err(CurveError::InvalidParams { base_price, slope });
        }
        Ok(Self { base_price, slope })
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Marginal price at the given supply.
    pub fn price(&self, supply: f64) -> f64 {
        self.base_price + self.slope * supply
    }

    /// Total capital required to mint `supply` units from zero.
    pub fn reserve(&self, supply: f64) -> f64 {
        self.base_price * supply + self.slope / 2.0 * supply * supply
    }

    /// Supply reachable with the given reserve; inverse of [`reserve`].
    ///
    /// [`reserve`]: Self::reserve
    pub fn supply(&self, reserve: f64) -> Result<f64> {
        if reserve < 0.0 {
            return Err(CurveError::NegativeReserve(reserve));
        }
        let b = self.base_price;
        let f = self.slope;
        Ok((-b + (b * b + 2.0 * f * reserve).sqrt()) / f)
    }

    /// Supply at which the marginal price equals `price`.
    pub fn supply_at_price(&self, price: f64) -> Result<f64> {
        if price < self.base_price {
            return Err(CurveError::PriceBelowBase {
                price,
                base_price: self.base_price,
            });
        }
        Ok((price - self.base_price) / self.slope)
    }

    /// Reserve collected once the marginal price has reached `price`.
    pub fn reserve_at_price(&self, price: f64) -> Result<f64> {
        Ok(self.reserve(self.supply_at_price(price)?))
    }

    /// Marginal price once the given reserve has been collected.
    pub fn price_at_reserve(&self, reserve: f64) -> Result<f64> {
        Ok(self.price(self.supply(reserve)?))
    }

    /// Capital needed to mint `num` more units at the current `supply`.
    pub fn cost(&self, supply: f64, num: f64) -> f64 {
        self.reserve(supply + num) - self.reserve(supply)
    }

    /// Units minted for `added_reserve` of new capital at the current
    /// `supply`, consistent with the curve wherever the starting point is.
    pub fn issued(&self, supply: f64, added_reserve: f64) -> Result<f64> {
        let reserve = self.reserve(supply);
        Ok(self.supply(reserve + added_reserve)? - self.supply(reserve)?)
    }

    /// Market cap at the given supply: marginal price times supply.
    pub fn mktcap(&self, supply: f64) -> f64 {
        self.price(supply) * supply
    }

    /// Priced supply that produces the given market cap when `skipped`
    /// units already exist but are excluded from the priced quantity.
    ///
    /// Solves `slope * s^2 + (base_price + skipped * slope) * s = mktcap`
    /// for its non-negative root.
    pub fn supply_at_mktcap(&self, mktcap: f64, skipped: f64) -> f64 {
        let f = self.slope;
        let b = self.base_price + skipped * self.slope;
        (-b + (b * b + 4.0 * f * mktcap).sqrt()) / (2.0 * f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx::approx_eq;

    fn curve() -> PriceSupplyCurve {
        PriceSupplyCurve::new(1.0, 0.000_001).unwrap()
    }

    #[test]
    fn test_rejects_bad_params() {
        assert!(PriceSupplyCurve::new(-1.0, 0.1).is_err());
        assert!(PriceSupplyCurve::new(0.0, 0.0).is_err());
        assert!(PriceSupplyCurve::new(0.0, -0.5).is_err());
        assert!(PriceSupplyCurve::new(0.0, 0.1).is_ok());
    }

    #[test]
    fn test_price_is_affine() {
        let c = curve();
        assert_eq!(c.price(0.0), 1.0);
        assert!(approx_eq(c.price(1_000_000.0), 2.0));
    }

    #[test]
    fn test_reserve_is_integral_of_price() {
        let c = curve();
        // b*s + f/2*s^2 at s = 2M: 2M + 2M = 4M
        assert!(approx_eq(c.reserve(2_000_000.0), 4_000_000.0));
        assert_eq!(c.reserve(0.0), 0.0);
    }

    #[test]
    fn test_supply_inverts_reserve() {
        let c = curve();
        for s in [0.0, 1.0, 1234.5, 1_000_000.0, 75_000_000.0] {
            assert!(approx_eq(c.supply(c.reserve(s)).unwrap(), s));
        }
        assert!(c.supply(-1.0).is_err());
    }

    #[test]
    fn test_supply_at_price_floor() {
        let c = curve();
        assert_eq!(c.supply_at_price(1.0).unwrap(), 0.0);
        assert!(approx_eq(c.supply_at_price(2.0).unwrap(), 1_000_000.0));
        assert!(matches!(
            c.supply_at_price(0.5),
            Err(CurveError::PriceBelowBase { .. })
        ));
    }

    #[test]
    fn test_cost_matches_reserve_delta() {
        let c = curve();
        let cost = c.cost(1_000_000.0, 10.0);
        assert!(approx_eq(
            cost,
            c.reserve(1_000_010.0) - c.reserve(1_000_000.0)
        ));
        // marginal cost of one unit sits just above the spot price
        assert!(c.cost(1_000_000.0, 1.0) >= c.price(1_000_000.0));
    }

    #[test]
    fn test_issued_inverts_cost() {
        let c = curve();
        let supply = 500_000.0;
        let num = 2_500.0;
        let value = c.cost(supply, num);
        assert!(approx_eq(c.issued(supply, value).unwrap(), num));
    }

    #[test]
    fn test_supply_at_mktcap_round_trip() {
        let c = curve();
        let skipped = 250_000.0;
        let mktcap = 30_000_000.0;
        let s = c.supply_at_mktcap(mktcap, skipped);
        assert!(approx_eq(c.price(s + skipped) * s, mktcap));
    }

    #[test]
    fn test_fifty_million_reserve_scenario() {
        let c = PriceSupplyCurve::new(0.0, 0.0001).unwrap();
        let reserve = 50_000_000.0;
        let supply = c.supply(reserve).unwrap();
        assert!(approx_eq(c.reserve(supply), reserve));
        assert!(approx_eq(c.price(supply), c.price_at_reserve(reserve).unwrap()));
    }
}
