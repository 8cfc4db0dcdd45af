//! Order snapshots and creation requests.

use {
    crate::{tron::TronAddress, u256_decimal},
    chrono::{DateTime, Utc},
    primitive_types::{H160, U256},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// Which way funds are moving.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum SwapDirection {
    /// TRC-20 stablecoins on Tron swapped into USDC/USDT on an EVM chain.
    #[default]
    FromTron,
    /// USDC/USDT on an EVM chain swapped into TRC-20 stablecoins.
    IntoTron,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Open,
    Closed,
    Expired,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

/// Orders are identified by the Tron receiver address the user pays into,
/// together with a nonce disambiguating successive orders for that receiver.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderId {
    pub receiver: TronAddress,
    pub nonce: u64,
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.receiver, self.nonce)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("order ids have the form <receiver>/<nonce>")]
pub struct ParseOrderIdError;

impl FromStr for OrderId {
    type Err = ParseOrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (receiver, nonce) = s.split_once('/').ok_or(ParseOrderIdError)?;
        Ok(Self {
            receiver: receiver.parse().map_err(|_| ParseOrderIdError)?,
            nonce: nonce.parse().map_err(|_| ParseOrderIdError)?,
        })
    }
}

/// A point-in-time view of an order as reported by the remote service.
///
/// All amounts are integer units of the order's token; `rate` is the locked-in
/// conversion rate in parts per million.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    #[serde(flatten)]
    pub id: OrderId,
    pub rate: u64,
    /// Units the counterparty committed to send to the receiver address.
    #[serde(with = "u256_decimal")]
    pub requested_total: U256,
    /// Units observed at the receiver address so far.
    #[serde(with = "u256_decimal")]
    pub received_total: U256,
    /// Units already paid out to the beneficiary.
    #[serde(with = "u256_decimal")]
    pub paid_total: U256,
    pub status: OrderStatus,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub direction: SwapDirection,
    /// Final recipient of the swapped funds on the destination chain.
    pub beneficiary: H160,
    pub to_chain: u64,
    pub to_token: H160,
    #[serde(with = "u256_decimal")]
    pub send_units: U256,
    /// The rate quoted to the user at creation time, parts per million.
    pub rate: u64,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    #[serde(flatten)]
    pub id: OrderId,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}
