//! Fixed-point integer arithmetic for token amounts.
//!
//! All monetary amounts are integers scaled by `10^decimals` ("units"); no
//! floating point representation is used anywhere money is involved.

pub mod conversions;
pub mod ratio;
pub mod units;

pub use {
    ratio::MathError,
    units::{format_units, parse_units, ParseUnitsError},
};
