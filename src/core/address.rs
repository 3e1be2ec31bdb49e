//! Account And Asset Addresses
//!
//! 20-byte addresses in the Ethereum style, carried as raw bytes and
//! rendered as 0x-prefixed lowercase hex. Serialized as hex strings so
//! game records stay readable in the external store.

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 20-byte account or asset-contract address.
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 20] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid address: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let addr = Address::new([0xab; 20]);
        let parsed = Address::from_hex(&addr.to_string()).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_parse_without_prefix() {
        let addr = Address::from_hex("abababababababababababababababababababab").unwrap();
        assert_eq!(addr, Address::new([0xab; 20]));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Address::from_hex("0xabab").is_none());
        assert!(Address::from_hex("not hex").is_none());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr = Address::new([0x01; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0101010101010101010101010101010101010101\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
