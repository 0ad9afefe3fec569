use curvemint_curve::{approx_eq, PriceSupplyCurve};
use proptest::prelude::*;

proptest! {
    #[test]
    fn supply_inverts_reserve(
        base in 0.0..10.0f64,
        slope in 1e-6..0.01f64,
        supply in 0.0..1e7f64,
    ) {
        let curve = PriceSupplyCurve::new(base, slope).unwrap();
        let reserve = curve.reserve(supply);
        prop_assert!(approx_eq(curve.supply(reserve).unwrap(), supply));
    }

    #[test]
    fn reserve_inverts_supply(
        base in 0.0..10.0f64,
        slope in 1e-6..0.01f64,
        reserve in 0.0..1e9f64,
    ) {
        let curve = PriceSupplyCurve::new(base, slope).unwrap();
        let supply = curve.supply(reserve).unwrap();
        prop_assert!(approx_eq(curve.reserve(supply), reserve));
    }

    #[test]
    fn price_strictly_increases_with_supply(
        base in 0.0..10.0f64,
        slope in 1e-6..0.01f64,
        supply in 0.0..1e7f64,
    ) {
        let curve = PriceSupplyCurve::new(base, slope).unwrap();
        prop_assert!(curve.price(supply + 1.0) > curve.price(supply));
    }

    #[test]
    fn cost_is_positive_for_positive_amounts(
        base in 0.0..10.0f64,
        slope in 1e-6..0.01f64,
        supply in 0.0..1e7f64,
        num in 0.001..1e5f64,
    ) {
        let curve = PriceSupplyCurve::new(base, slope).unwrap();
        prop_assert!(curve.cost(supply, num) > 0.0);
    }

    #[test]
    fn mktcap_inversion_round_trips(
        base in 0.0..10.0f64,
        slope in 1e-6..0.01f64,
        mktcap in 1.0..1e9f64,
        skipped in 0.0..1e6f64,
    ) {
        let curve = PriceSupplyCurve::new(base, slope).unwrap();
        let supply = curve.supply_at_mktcap(mktcap, skipped);
        prop_assert!(supply >= 0.0);
        prop_assert!(approx_eq(curve.price(supply + skipped) * supply, mktcap));
    }
}
