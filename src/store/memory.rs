//! In-Memory Game Store
//!
//! Reference `GameStore` backed by a BTreeMap. Used by the demo binary
//! and the engine tests; production deployments swap in a durable
//! backend behind the same trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::game::state::{Game, GameId};
use crate::store::{GameStore, StoreError};

/// BTreeMap-backed store; id order falls out of the map ordering.
pub struct MemoryStore {
    games: RwLock<BTreeMap<GameId, Game>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            games: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored games.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    /// Whether the store holds no games.
    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn load(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        let games = self.games.read().await;
        Ok(games.get(&id).cloned())
    }

    async fn save(&self, game: &Game) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        games.insert(game.id, game.clone());
        Ok(())
    }

    async fn next_id(&self) -> Result<GameId, StoreError> {
        let games = self.games.read().await;
        Ok(games.keys().next_back().map(|id| id + 1).unwrap_or(0))
    }

    async fn list_ids(&self) -> Result<Vec<GameId>, StoreError> {
        let games = self.games.read().await;
        Ok(games.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::address::Address;
    use crate::core::team::{Team, TeamMember};
    use crate::game::state::StakeDescriptor;
    use crate::proof::commitment::{compute_commitment, to_uint256};
    use chrono::Utc;

    fn sample_game(id: GameId) -> Game {
        let members = vec![
            TeamMember {
                address: Address::new([0xaa; 20]),
                asset_id: 1,
                name: "Aldric".to_string(),
                background: "Forest".to_string(),
                traits: vec![5, 5, 5, 5, 5],
            },
            TeamMember {
                address: Address::new([0xaa; 20]),
                asset_id: 2,
                name: "Brakka".to_string(),
                background: "Dune".to_string(),
                traits: vec![5, 5, 5, 5, 5],
            },
            TeamMember {
                address: Address::new([0xaa; 20]),
                asset_id: 3,
                name: "Cinder".to_string(),
                background: "Mist".to_string(),
                traits: vec![5, 5, 5, 5, 5],
            },
        ];
        let team = Team::try_new(members).unwrap();
        let salt = to_uint256(1);
        let commitment =
            compute_commitment(&salt, &team.asset_addresses(), &team.asset_ids()).unwrap();
        Game::create(
            id,
            Address::new([0x01; 20]),
            StakeDescriptor {
                token: "CLASH".to_string(),
                amount: "100".to_string(),
            },
            team,
            commitment,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_next_id_starts_at_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.next_id().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_next_id_is_max_plus_one() {
        let store = MemoryStore::new();
        store.save(&sample_game(0)).await.unwrap();
        store.save(&sample_game(5)).await.unwrap();
        assert_eq!(store.next_id().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_load_save_round_trip() {
        let store = MemoryStore::new();
        let game = sample_game(3);
        store.save(&game).await.unwrap();

        let loaded = store.load(3).await.unwrap().unwrap();
        assert_eq!(loaded.id, 3);
        assert_eq!(loaded.creator, game.creator);

        assert!(store.load(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_ids_ascending() {
        let store = MemoryStore::new();
        for id in [4, 0, 2] {
            store.save(&sample_game(id)).await.unwrap();
        }
        assert_eq!(store.list_ids().await.unwrap(), vec![0, 2, 4]);
    }
}
