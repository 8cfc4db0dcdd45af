//! Fixed-point rate and fee arithmetic for swap quotes.
//!
//! Conversion rates are integers scaled by [`RATE_SCALE`]; all intermediate
//! arithmetic stays in integers with explicitly chosen rounding, so two
//! implementations of the same quote can never disagree by a unit.

mod quote;
mod rate;

pub use {
    quote::{quote_receive, quote_send, Quote, QuoteError, QuoteParams},
    rate::{InvalidRate, Rate},
};

use {number::ratio, number::MathError, primitive_types::U256};

/// Fixed denominator used to express conversion rates as integers, e.g. a
/// rate of 0.9997 is stored as `999_700`.
pub const RATE_SCALE: u64 = 1_000_000;

/// Basis point denominator (10000 bps = 100%).
pub const BPS_SCALE: u64 = 10_000;

/// Proportional fee charged on from-Tron swaps, in basis points.
pub const FROM_TRON_FEE_BPS: u64 = 10;

/// Converts sent units into received units at the given rate, rounding
/// half up.
pub fn convert_send_to_receive(send: U256, rate: Rate) -> Result<U256, MathError> {
    ratio::mul_div_round_half_up(send, rate.get(), RATE_SCALE)
}

/// The round-half-up inverse of [`convert_send_to_receive`].
pub fn convert_receive_to_send(receive: U256, rate: Rate) -> Result<U256, MathError> {
    ratio::mul_div_round_half_up(receive, RATE_SCALE, rate.get())
}

/// Like [`convert_receive_to_send`] but rounds up, for quoting the amount a
/// user has to send: under-quoting the required send amount must never
/// happen.
pub fn convert_receive_to_send_ceil(receive: U256, rate: Rate) -> Result<U256, MathError> {
    ratio::mul_div_ceil(receive, RATE_SCALE, rate.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(ppm: u64) -> Rate {
        Rate::new(ppm).unwrap()
    }

    #[test]
    fn zero_converts_to_zero() {
        for ppm in [1, 500_000, 999_700, RATE_SCALE] {
            assert_eq!(
                convert_send_to_receive(U256::zero(), rate(ppm)).unwrap(),
                U256::zero()
            );
            assert_eq!(
                convert_receive_to_send(U256::zero(), rate(ppm)).unwrap(),
                U256::zero()
            );
        }
    }

    #[test]
    fn rounds_half_up() {
        // 3 * 0.5 = 1.5 rounds to 2.
        assert_eq!(
            convert_send_to_receive(3.into(), rate(500_000)).unwrap(),
            2.into()
        );
        // 2 / 0.5 = 4 exactly.
        assert_eq!(
            convert_receive_to_send(2.into(), rate(500_000)).unwrap(),
            4.into()
        );
    }

    #[test]
    fn unit_rate_is_the_identity() {
        for value in [0u64, 1, 999_999, 123_456_789] {
            let value = U256::from(value);
            assert_eq!(convert_send_to_receive(value, Rate::ONE).unwrap(), value);
            assert_eq!(convert_receive_to_send(value, Rate::ONE).unwrap(), value);
            assert_eq!(
                convert_receive_to_send_ceil(value, Rate::ONE).unwrap(),
                value
            );
        }
    }

    #[test]
    fn ceil_conversion_never_under_quotes() {
        let rate = rate(999_000);
        for receive in 0u64..1_000 {
            let receive = U256::from(receive);
            let send = convert_receive_to_send_ceil(receive, rate).unwrap();
            // send * rate / RATE_SCALE >= receive, before any rounding.
            assert!(send.full_mul(999_000.into()) >= receive.full_mul(RATE_SCALE.into()));
        }
    }
}
