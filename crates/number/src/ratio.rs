//! Checked multiply-then-divide helpers for fixed-point rates.
//!
//! Products go through a 512 bit intermediate so `a * num` can never
//! overflow before the division.

use {
    primitive_types::{U256, U512},
    thiserror::Error,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
}

/// Computes `(amount * numerator + denominator / 2) / denominator`, i.e.
/// multiplication followed by a round-half-up integer division.
pub fn mul_div_round_half_up(
    amount: U256,
    numerator: u64,
    denominator: u64,
) -> Result<U256, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    let product = amount.full_mul(U256::from(numerator)) + U512::from(denominator / 2);
    u512_to_u256(product / U512::from(denominator))
}

/// Like [`mul_div_round_half_up`] but rounds the division up.
pub fn mul_div_ceil(amount: U256, numerator: u64, denominator: u64) -> Result<U256, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    let product = amount.full_mul(U256::from(numerator)) + U512::from(denominator - 1);
    u512_to_u256(product / U512::from(denominator))
}

fn u512_to_u256(value: U512) -> Result<U256, MathError> {
    let U512(ref limbs) = value;
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(MathError::Overflow);
    }
    Ok(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}
