use {
    crate::{BPS_SCALE, RATE_SCALE},
    thiserror::Error,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("rate must be in (0, {RATE_SCALE}], got {0}")]
pub struct InvalidRate(pub u64);

/// A conversion rate in parts per million, guaranteed to be in
/// `(0, RATE_SCALE]`: every supported conversion pays out at most one unit
/// per unit sent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rate(u64);

impl Rate {
    /// The identity rate of 1.0.
    pub const ONE: Self = Self(RATE_SCALE);

    pub fn new(ppm: u64) -> Result<Self, InvalidRate> {
        if ppm == 0 || ppm > RATE_SCALE {
            return Err(InvalidRate(ppm));
        }
        Ok(Self(ppm))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Discounts the rate by a proportional fee in basis points, truncating:
    /// `rate - rate * fee_bps / BPS_SCALE`.
    ///
    /// Fails when the fee eats the entire rate (`fee_bps >= BPS_SCALE`). The
    /// fee is wire controlled, so it is rejected up front instead of trusted
    /// to stay within the product's range.
    pub fn with_proportional_fee(self, fee_bps: u64) -> Result<Self, InvalidRate> {
        if fee_bps >= BPS_SCALE {
            return Err(InvalidRate(0));
        }
        // rate <= RATE_SCALE and fee_bps < BPS_SCALE, so the product fits.
        let fee = self.0 * fee_bps / BPS_SCALE;
        Self::new(self.0 - fee)
    }
}

impl TryFrom<u64> for Rate {
    type Error = InvalidRate;

    fn try_from(ppm: u64) -> Result<Self, Self::Error> {
        Self::new(ppm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_enforced() {
        assert_eq!(Rate::new(0), Err(InvalidRate(0)));
        assert_eq!(Rate::new(RATE_SCALE + 1), Err(InvalidRate(RATE_SCALE + 1)));
        assert_eq!(Rate::new(RATE_SCALE).unwrap(), Rate::ONE);
        assert!(Rate::new(1).is_ok());
    }

    #[test]
    fn proportional_fee_discounts_the_rate() {
        // 10 bps off the identity rate: 1_000_000 - 1_000 = 999_000.
        assert_eq!(
            Rate::ONE.with_proportional_fee(10).unwrap(),
            Rate::new(999_000).unwrap()
        );
        // Fee amounts truncate.
        assert_eq!(
            Rate::new(999_700).unwrap().with_proportional_fee(10).unwrap(),
            // 999_700 * 10 / 10_000 = 999.7, truncated to 999.
            Rate::new(998_701).unwrap()
        );
        // No fee leaves the rate untouched.
        assert_eq!(Rate::ONE.with_proportional_fee(0).unwrap(), Rate::ONE);
    }

    #[test]
    fn total_fee_is_rejected() {
        assert!(Rate::ONE.with_proportional_fee(BPS_SCALE).is_err());
        assert!(Rate::ONE.with_proportional_fee(BPS_SCALE + 1).is_err());
        // Large enough that `rate * fee_bps` would wrap 64 bits if computed
        // before the bounds check.
        assert!(Rate::ONE
            .with_proportional_fee(184_467_440_737_096_000)
            .is_err());
        assert!(Rate::ONE.with_proportional_fee(u64::MAX).is_err());
    }
}
