//! Tron addresses (21 bytes, `0x41` prefix + 20 byte body).

use {
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

pub const PREFIX: u8 = 0x41;
pub const LEN: usize = 21;

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TronAddress([u8; LEN]);

// No `Eq` because `hex::FromHexError` only implements `PartialEq`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseTronAddressError {
    #[error("invalid base58check encoding: {0}")]
    Base58(String),
    #[error("invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("tron address must be 21 bytes starting with 0x41")]
    InvalidPayload,
}

impl TronAddress {
    pub fn from_bytes(bytes: [u8; LEN]) -> Result<Self, ParseTronAddressError> {
        if bytes[0] != PREFIX {
            return Err(ParseTronAddressError::InvalidPayload);
        }
        Ok(Self(bytes))
    }

    /// Parses the canonical base58check form (`T...`).
    pub fn from_base58(s: &str) -> Result<Self, ParseTronAddressError> {
        let payload = bs58::decode(s)
            .with_check(Some(PREFIX))
            .into_vec()
            .map_err(|err| ParseTronAddressError::Base58(err.to_string()))?;
        Self::from_payload(&payload)
    }

    /// Parses the hex form, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ParseTronAddressError> {
        let payload = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
        Self::from_payload(&payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self, ParseTronAddressError> {
        let bytes: [u8; LEN] = payload
            .try_into()
            .map_err(|_| ParseTronAddressError::InvalidPayload)?;
        Self::from_bytes(bytes)
    }

    /// The canonical base58check form.
    pub fn to_base58(self) -> String {
        bs58::encode(self.0).with_check().into_string()
    }

    pub fn as_bytes(&self) -> &[u8; LEN] {
        &self.0
    }
}

impl FromStr for TronAddress {
    type Err = ParseTronAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('T') {
            Self::from_base58(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TronAddress({} / 0x{})", self.to_base58(), hex::encode(self.0))
    }
}

impl Serialize for TronAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for TronAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
