//! Serde adapters that write big integers as strings instead of digit arrays.

/// Base-10 strings, e.g. `"123"`.
pub mod decimal {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(deserializer)?;
        BigUint::parse_bytes(text.trim().as_bytes(), 10)
            .ok_or_else(|| D::Error::custom(format!("not a decimal integer: {:?}", text)))
    }
}

/// `0x`-prefixed base-16 strings, e.g. `"0x7b"`. The prefix is optional on input.
pub mod hex {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| D::Error::custom(format!("not a hex integer: {:?}", text)))
    }

    pub fn parse(text: &str) -> Option<BigUint> {
        let text = text.trim();
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        BigUint::parse_bytes(digits.as_bytes(), 16)
    }
}
