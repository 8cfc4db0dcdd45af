//! Serde support for `U256` amounts as decimal strings on the wire.

use {
    primitive_types::U256,
    serde::{de, Deserializer, Serializer},
    std::fmt,
};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = U256;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an amount of units encoded as a decimal string")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            U256::from_dec_str(s).map_err(|err| {
                de::Error::custom(format!("failed to decode {s:?} as decimal units: {err}"))
            })
        }
    }

    deserializer.deserialize_str(Visitor)
}

#[cfg(test)]
mod tests {
    use {super::*, serde::Deserialize, serde_json::json};

    #[derive(Debug, Deserialize, Eq, PartialEq)]
    struct Amount(#[serde(with = "super")] U256);

    #[test]
    fn deserializes_decimal_strings() {
        assert_eq!(
            serde_json::from_value::<Amount>(json!("2500000")).unwrap(),
            Amount(2_500_000u64.into()),
        );
        assert_eq!(
            serde_json::from_value::<Amount>(json!("0")).unwrap(),
            Amount(U256::zero()),
        );
    }

    #[test]
    fn rejects_numbers_and_hex() {
        assert!(serde_json::from_value::<Amount>(json!(2_500_000)).is_err());
        assert!(serde_json::from_value::<Amount>(json!("0x2625a0")).is_err());
    }
}
