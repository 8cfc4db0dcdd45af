//! The liquidity/info response of the remote order service.

use {
    crate::u256_decimal,
    primitive_types::U256,
    serde::{Deserialize, Serialize},
};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    /// The current from-Tron conversion rate in parts per million.
    pub rate: u64,
    /// Proportional from-Tron fee in basis points.
    pub fee_bps: u64,
    /// Flat into-Tron fee in units.
    #[serde(with = "u256_decimal")]
    pub static_fee: U256,
    /// Liquidity currently available for payouts, in units.
    #[serde(with = "u256_decimal")]
    pub available_liquidity: U256,
    /// Hard per-order output ceiling, in units.
    #[serde(with = "u256_decimal")]
    pub max_order_units: U256,
}

impl ExchangeInfo {
    /// The output ceiling actually in effect: whatever is lower, the
    /// available liquidity or the per-order cap.
    pub fn effective_max_units(&self) -> U256 {
        self.available_liquidity.min(self.max_order_units)
    }
}
