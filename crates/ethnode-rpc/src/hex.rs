//! Hex quantity encoding
//!
//! The node API carries integers as `0x`-prefixed hexadecimal text with no
//! padding (`0x0`, `0x1a`, `0x400`). Fields that use this encoding are
//! declared either with the [`Quantity`] newtype or with
//! `#[serde(with = "ethnode_rpc::hex::serde_quantity")]`.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

const PREFIX: &str = "0x";

/// Encode an integer as a hex quantity
pub fn encode(n: u128) -> String {
    format!("{PREFIX}{n:x}")
}

/// Decode a hex quantity, with or without the `0x` prefix
pub fn decode(s: &str) -> Result<u128, FormatError> {
    let digits = s.strip_prefix(PREFIX).unwrap_or(s);

    if digits.is_empty() {
        return Err(FormatError::Empty);
    }

    // from_str_radix tolerates a leading sign, the wire format does not
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidDigit(s.to_string()));
    }

    u128::from_str_radix(digits, 16).map_err(|_| FormatError::Overflow(s.to_string()))
}

/// An integer that travels as a hex quantity on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(pub u128);

impl Quantity {
    pub fn value(self) -> u128 {
        self.0
    }
}

impl From<u128> for Quantity {
    fn from(n: u128) -> Self {
        Self(n)
    }
}

impl From<u64> for Quantity {
    fn from(n: u64) -> Self {
        Self(n.into())
    }
}

impl From<Quantity> for u128 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.0))
    }
}

impl FromStr for Quantity {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s).map(Self)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a 0x-prefixed hex quantity")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        decode(v).map(Quantity).map_err(E::custom)
    }

    // Some nodes answer small quantities as plain JSON numbers
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Quantity(v.into()))
    }
}

/// `#[serde(with = ...)]` adapter for `u128` fields carried as hex quantities
pub mod serde_quantity {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Quantity;

    pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Quantity(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        Quantity::deserialize(deserializer).map(u128::from)
    }
}

/// `#[serde(with = ...)]` adapter for optional hex quantity fields
pub mod serde_quantity_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Quantity;

    pub fn serialize<S>(value: &Option<u128>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&Quantity(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u128>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Quantity>::deserialize(deserializer).map(|q| q.map(u128::from))
    }
}
