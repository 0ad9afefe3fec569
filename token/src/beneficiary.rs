//! Seigniorage beneficiary

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};

/// Designated recipient of a fixed fraction of every issuance event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beneficiary {
    account: String,
    fraction: f64,
}

impl Beneficiary {
    /// Creates a beneficiary taking `fraction` of newly minted supply.
    /// The fraction must lie in `[0, 1)`.
    pub fn new(account: impl Into<String>, fraction: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&fraction) {
            return Err(TokenError::InvalidFraction(fraction));
        }
        Ok(Self {
            account: account.into(),
            fraction,
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Gross-up multiplier `1 / (1 - fraction)`: issuing `num * factor()`
    /// gross units leaves `num` with the buyer after the seigniorage cut.
    pub fn factor(&self) -> f64 {
        1.0 / (1.0 - self.fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_bounds() {
        assert!(Beneficiary::new("issuer", 0.0).is_ok());
        assert!(Beneficiary::new("issuer", 0.999).is_ok());
        assert!(matches!(
            Beneficiary::new("issuer", 1.0),
            Err(TokenError::InvalidFraction(_))
        ));
        assert!(Beneficiary::new("issuer", -0.1).is_err());
    }

    #[test]
    fn test_factor_is_reciprocal() {
        let b = Beneficiary::new("issuer", 0.2).unwrap();
        assert!((b.factor() - 1.25).abs() < 1e-12);
        let none = Beneficiary::new("issuer", 0.0).unwrap();
        assert_eq!(none.factor(), 1.0);
    }
}
