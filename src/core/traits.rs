//! Combat Trait Vectors
//!
//! The five combat stats of a character asset, in fixed semantic order:
//! attack, defense, vitality, agility, core. Immutable once recorded for
//! a team slot.
//!
//! Raw trait rows arrive (and persist) as signed integer sequences, so
//! structural validation here is a real check: wrong length or negative
//! components are rejected as malformed, never coerced.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Number of components in a trait vector.
pub const TRAIT_COUNT: usize = 5;

/// A validated 5-component combat stat vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitVector {
    /// Offensive power.
    pub attack: u32,
    /// Damage absorption.
    pub defense: u32,
    /// Health pool contribution.
    pub vitality: u32,
    /// Speed; counts toward effective attack.
    pub agility: u32,
    /// Core energy; the round's survival stat.
    pub core: u32,
}

impl TraitVector {
    /// Create from the five components in semantic order.
    pub const fn new(attack: u32, defense: u32, vitality: u32, agility: u32, core: u32) -> Self {
        Self { attack, defense, vitality, agility, core }
    }

    /// Validate a raw persisted row: exactly 5 components, all non-negative.
    pub fn try_from_raw(row: &[i64]) -> Result<Self, GameError> {
        if row.len() != TRAIT_COUNT {
            return Err(GameError::MalformedInput(format!(
                "trait row has {} components, expected {}",
                row.len(),
                TRAIT_COUNT
            )));
        }
        for (i, &v) in row.iter().enumerate() {
            if v < 0 || v > u32::MAX as i64 {
                return Err(GameError::MalformedInput(format!(
                    "trait component {} out of range: {}",
                    i, v
                )));
            }
        }
        Ok(Self::new(
            row[0] as u32,
            row[1] as u32,
            row[2] as u32,
            row[3] as u32,
            row[4] as u32,
        ))
    }

    /// Components in semantic order.
    pub fn as_array(&self) -> [u32; TRAIT_COUNT] {
        [self.attack, self.defense, self.vitality, self.agility, self.core]
    }

    /// Raw persisted form of this vector.
    pub fn to_raw(&self) -> Vec<i64> {
        self.as_array().iter().map(|&v| v as i64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_row() {
        let v = TraitVector::try_from_raw(&[10, 20, 30, 40, 50]).unwrap();
        assert_eq!(v, TraitVector::new(10, 20, 30, 40, 50));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            TraitVector::try_from_raw(&[1, 2, 3, 4]),
            Err(GameError::MalformedInput(_))
        ));
        assert!(matches!(
            TraitVector::try_from_raw(&[1, 2, 3, 4, 5, 6]),
            Err(GameError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_negative_component_rejected() {
        assert!(matches!(
            TraitVector::try_from_raw(&[1, 2, -3, 4, 5]),
            Err(GameError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_raw_round_trip() {
        let v = TraitVector::new(1, 2, 3, 4, 5);
        assert_eq!(TraitVector::try_from_raw(&v.to_raw()).unwrap(), v);
    }
}
