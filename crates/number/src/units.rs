//! Conversion between human readable decimal strings and integer units.

use {
    num::{bigint::Sign, BigInt, Zero},
    std::str::FromStr,
    thiserror::Error,
};

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{0:?} is not a valid decimal amount")]
pub struct ParseUnitsError(pub String);

/// Parses an optionally negative decimal string into an integer scaled by
/// `10^decimals`.
///
/// Excess fractional digits are truncated, never rounded. The empty string
/// parses to zero. Anything other than an optional leading minus sign, ascii
/// digits and a single decimal point is rejected.
pub fn parse_units(value: &str, decimals: u32) -> Result<BigInt, ParseUnitsError> {
    let error = || ParseUnitsError(value.to_string());

    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (unsigned, ""),
    };
    // A second decimal point ends up in `fraction` and fails the digit check.
    if !integer.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(error());
    }

    let decimals = decimals as usize;
    let mut scaled = String::with_capacity(integer.len() + decimals);
    scaled.push_str(integer);
    if fraction.len() >= decimals {
        scaled.push_str(&fraction[..decimals]);
    } else {
        scaled.push_str(fraction);
        scaled.extend(std::iter::repeat('0').take(decimals - fraction.len()));
    }

    if scaled.bytes().all(|b| b == b'0') {
        // Covers "", ".", "0.00" and "-0"; zero has no sign.
        return Ok(BigInt::zero());
    }
    // Unwrap because `scaled` is a non-empty ascii digit string.
    let magnitude = BigInt::from_str(&scaled).unwrap();
    Ok(if negative { -magnitude } else { magnitude })
}

/// Formats integer units as a decimal string, the inverse of [`parse_units`].
///
/// Trailing zeros of the fractional part are trimmed and the decimal point is
/// omitted entirely when the fraction is empty, so `1_000_000` units at 6
/// decimals formats as `"1"`.
pub fn format_units(units: &BigInt, decimals: u32) -> String {
    let decimals = decimals as usize;
    let mut digits = units.magnitude().to_string();
    if digits.len() < decimals + 1 {
        digits = format!("{:0>width$}", digits, width = decimals + 1);
    }

    let split = digits.len() - decimals;
    let integer = &digits[..split];
    let fraction = digits[split..].trim_end_matches('0');

    let mut formatted =
        String::with_capacity(integer.len() + fraction.len() + 2);
    if units.sign() == Sign::Minus {
        formatted.push('-');
    }
    formatted.push_str(integer);
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}
