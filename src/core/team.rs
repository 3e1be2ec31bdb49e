//! Team Composition
//!
//! A team is exactly three character assets fighting in fixed slots.
//! Composition rules from the asset collection: display names must be
//! unique within a team, and at most one member may carry a rare
//! background label.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::address::Address;
use crate::core::traits::TraitVector;
use crate::error::GameError;

/// Members per team.
pub const TEAM_SIZE: usize = 3;

/// The closed set of rare background labels.
pub const RARE_BACKGROUNDS: [&str; 4] = ["Gold", "Silver", "Verdant Green", "Rose Gold"];

/// Team composition rule violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeamViolation {
    /// Team does not have exactly 3 members.
    #[error("team has {got} members, expected 3")]
    WrongSize {
        /// Number of members supplied.
        got: usize,
    },

    /// Two members share a display name.
    #[error("duplicate character: {name}")]
    DuplicateName {
        /// The repeated display name.
        name: String,
    },

    /// More than one member carries a rare background.
    #[error("team can have at most 1 rare background, found {count}")]
    TooManyRare {
        /// Number of rare-background members.
        count: usize,
    },
}

/// One character asset on a team.
///
/// Trait data is kept in its raw persisted form; `trait_vector` validates
/// it on every use so corrupted store records surface as malformed input
/// instead of an arbitrary settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Asset contract address.
    pub address: Address,

    /// Asset id within the contract.
    pub asset_id: u64,

    /// Display name (unique within a team).
    pub name: String,

    /// Background label from the collection.
    pub background: String,

    /// Raw trait row: attack, defense, vitality, agility, core.
    pub traits: Vec<i64>,
}

impl TeamMember {
    /// Whether this member's background is in the rare set.
    pub fn has_rare_background(&self) -> bool {
        RARE_BACKGROUNDS.contains(&self.background.as_str())
    }

    /// Validate and extract this member's trait vector.
    pub fn trait_vector(&self) -> Result<TraitVector, GameError> {
        TraitVector::try_from_raw(&self.traits)
    }
}

/// A validated team of exactly 3 members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    members: [TeamMember; TEAM_SIZE],
}

impl Team {
    /// Validate composition rules and trait structure, then build the team.
    ///
    /// Rule order: size, trait structure, duplicate names, rare count.
    pub fn try_new(members: Vec<TeamMember>) -> Result<Self, GameError> {
        let count = members.len();
        let members: [TeamMember; TEAM_SIZE] = members
            .try_into()
            .map_err(|_| TeamViolation::WrongSize { got: count })?;

        let mut seen_names = BTreeSet::new();
        let mut rare_count = 0;

        for member in &members {
            member.trait_vector()?;

            if !seen_names.insert(member.name.clone()) {
                return Err(TeamViolation::DuplicateName {
                    name: member.name.clone(),
                }
                .into());
            }

            if member.has_rare_background() {
                rare_count += 1;
            }
        }

        if rare_count > 1 {
            return Err(TeamViolation::TooManyRare { count: rare_count }.into());
        }

        Ok(Self { members })
    }

    /// Team members in slot order.
    pub fn members(&self) -> &[TeamMember; TEAM_SIZE] {
        &self.members
    }

    /// Asset contract addresses in slot order.
    pub fn asset_addresses(&self) -> [Address; TEAM_SIZE] {
        [
            self.members[0].address,
            self.members[1].address,
            self.members[2].address,
        ]
    }

    /// Asset ids in slot order.
    pub fn asset_ids(&self) -> [u64; TEAM_SIZE] {
        [
            self.members[0].asset_id,
            self.members[1].asset_id,
            self.members[2].asset_id,
        ]
    }

    /// Re-validate trait structure and extract slot-aligned vectors.
    pub fn slot_vectors(&self) -> Result<[TraitVector; TEAM_SIZE], GameError> {
        Ok([
            self.members[0].trait_vector()?,
            self.members[1].trait_vector()?,
            self.members[2].trait_vector()?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, background: &str) -> TeamMember {
        TeamMember {
            address: Address::new([0x11; 20]),
            asset_id: 7,
            name: name.to_string(),
            background: background.to_string(),
            traits: vec![10, 10, 10, 10, 10],
        }
    }

    #[test]
    fn test_valid_team() {
        let team = Team::try_new(vec![
            member("Aldric", "Forest"),
            member("Brakka", "Gold"),
            member("Cinder", "Dune"),
        ])
        .unwrap();
        assert_eq!(team.members().len(), 3);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let result = Team::try_new(vec![member("Aldric", "Forest"), member("Brakka", "Dune")]);
        assert!(matches!(
            result,
            Err(GameError::InvalidTeam(TeamViolation::WrongSize { got: 2 }))
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = Team::try_new(vec![
            member("Aldric", "Forest"),
            member("Aldric", "Dune"),
            member("Cinder", "Mist"),
        ]);
        assert!(matches!(
            result,
            Err(GameError::InvalidTeam(TeamViolation::DuplicateName { .. }))
        ));
    }

    #[test]
    fn test_two_rare_backgrounds_rejected() {
        let result = Team::try_new(vec![
            member("Aldric", "Gold"),
            member("Brakka", "Gold"),
            member("Cinder", "Forest"),
        ]);
        assert!(matches!(
            result,
            Err(GameError::InvalidTeam(TeamViolation::TooManyRare { count: 2 }))
        ));
    }

    #[test]
    fn test_mixed_rare_backgrounds_rejected() {
        let result = Team::try_new(vec![
            member("Aldric", "Silver"),
            member("Brakka", "Rose Gold"),
            member("Cinder", "Forest"),
        ]);
        assert!(matches!(
            result,
            Err(GameError::InvalidTeam(TeamViolation::TooManyRare { count: 2 }))
        ));
    }

    #[test]
    fn test_single_rare_allowed() {
        assert!(Team::try_new(vec![
            member("Aldric", "Verdant Green"),
            member("Brakka", "Forest"),
            member("Cinder", "Dune"),
        ])
        .is_ok());
    }

    #[test]
    fn test_malformed_traits_rejected() {
        let mut bad = member("Aldric", "Forest");
        bad.traits = vec![10, 10, 10];
        let result = Team::try_new(vec![bad, member("Brakka", "Dune"), member("Cinder", "Mist")]);
        assert!(matches!(result, Err(GameError::MalformedInput(_))));
    }
}
