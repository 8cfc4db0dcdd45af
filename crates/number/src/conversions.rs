//! Conversions between `U256` wire amounts and arbitrary precision integers.

use {
    anyhow::{ensure, Result},
    num::{bigint::Sign, BigInt, BigUint},
    primitive_types::U256,
};

pub fn u256_to_big_uint(input: &U256) -> BigUint {
    let mut bytes = [0; 32];
    input.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

pub fn u256_to_big_int(input: &U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, u256_to_big_uint(input))
}

pub fn big_uint_to_u256(input: &BigUint) -> Result<U256> {
    let bytes = input.to_bytes_be();
    ensure!(bytes.len() <= 32, "too large");
    Ok(U256::from_big_endian(&bytes))
}

pub fn big_int_to_u256(input: &BigInt) -> Result<U256> {
    ensure!(input.sign() != Sign::Minus, "negative");
    big_uint_to_u256(input.magnitude())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::One;

    #[test]
    fn u256_to_big_int_and_back() {
        for value in [U256::zero(), U256::one(), U256::from(1_234_500u64), U256::MAX] {
            let big = u256_to_big_int(&value);
            assert_eq!(big_int_to_u256(&big).unwrap(), value);
        }
    }

    #[test]
    fn negative_big_int_is_rejected() {
        assert!(big_int_to_u256(&BigInt::from(-1)).is_err());
    }

    #[test]
    fn oversized_big_uint_is_rejected() {
        let too_large = u256_to_big_uint(&U256::MAX) + BigUint::one();
        assert!(big_uint_to_u256(&too_large).is_err());
    }
}
