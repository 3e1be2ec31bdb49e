//! Team Commitment Protocol
//!
//! Players commit to their team before the opponent's is known and
//! reveal after both sides are locked in. The commitment is a
//! Keccak-256 digest over the packed tuple
//!
//! ```text
//! salt (32 BE) | addr0 (20) | addr1 (20) | addr2 (20)
//!              | id0 (32 BE) | id1 (32 BE) | id2 (32 BE)
//! ```
//!
//! byte-compatible with the on-chain `keccak256(abi.encodePacked(...))`
//! form, so commitments issued against the contract verify here
//! unchanged. Verification is pure: an auditor can re-run it without
//! touching game state.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::core::address::Address;
use crate::core::team::TEAM_SIZE;
use crate::error::GameError;

/// 32-byte reveal salt, big-endian uint256.
pub type Salt = [u8; 32];

/// Packed preimage length: salt + 3 addresses + 3 asset ids.
const PREIMAGE_LEN: usize = 32 + TEAM_SIZE * 20 + TEAM_SIZE * 32;

/// A 32-byte team commitment digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
    /// Parse from a hex string, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Get raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", self)
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Commitment::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid commitment: {}", s)))
    }
}

/// Widen a u64 asset id or salt value to a big-endian uint256.
pub fn to_uint256(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

/// Pack (salt, addresses, ids) into the canonical preimage bytes.
///
/// Fails with `MalformedInput` unless both slices have exactly 3 entries.
fn pack_preimage(salt: &Salt, addresses: &[Address], ids: &[u64]) -> Result<Vec<u8>, GameError> {
    if addresses.len() != TEAM_SIZE {
        return Err(GameError::MalformedInput(format!(
            "commitment needs {} asset addresses, got {}",
            TEAM_SIZE,
            addresses.len()
        )));
    }
    if ids.len() != TEAM_SIZE {
        return Err(GameError::MalformedInput(format!(
            "commitment needs {} asset ids, got {}",
            TEAM_SIZE,
            ids.len()
        )));
    }

    let mut packed = Vec::with_capacity(PREIMAGE_LEN);
    packed.extend_from_slice(salt);
    for addr in addresses {
        packed.extend_from_slice(addr.as_bytes());
    }
    for &id in ids {
        packed.extend_from_slice(&to_uint256(id));
    }

    debug_assert_eq!(packed.len(), PREIMAGE_LEN);
    Ok(packed)
}

/// Compute the commitment digest for (salt, addresses, ids).
pub fn compute_commitment(
    salt: &Salt,
    addresses: &[Address],
    ids: &[u64],
) -> Result<Commitment, GameError> {
    let packed = pack_preimage(salt, addresses, ids)?;
    let digest = Keccak256::digest(&packed);
    Ok(Commitment(digest.into()))
}

/// Verify revealed data against a stored commitment.
///
/// Returns true iff the recomputed digest equals `expected` byte for byte.
pub fn verify_commitment(
    expected: &Commitment,
    salt: &Salt,
    addresses: &[Address],
    ids: &[u64],
) -> Result<bool, GameError> {
    let computed = compute_commitment(salt, addresses, ids)?;
    Ok(computed == *expected)
}
