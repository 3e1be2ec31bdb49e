//! Game Storage
//!
//! The game collection is the only shared mutable resource and it is
//! owned by an external store. The core treats each game as a value it
//! loads, transforms, and hands back; `GameLocks` provides the per-game
//! mutual exclusion that makes the read-modify-write cycle safe even
//! when the backing store has no transactional guarantees.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::game::state::{Game, GameId};

pub mod memory;

pub use memory::MemoryStore;

/// External store failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The backing store failed to load or persist a record.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Pluggable game repository.
///
/// Implementations own durability and archival; the core only relies on
/// load/save plus id assignment. Any backend works as long as `save` is
/// atomic per record.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Load a game by id, None if unknown.
    async fn load(&self, id: GameId) -> Result<Option<Game>, StoreError>;

    /// Persist a game record, replacing any previous version.
    async fn save(&self, game: &Game) -> Result<(), StoreError>;

    /// Assign the next game id: max existing + 1, or 0 when empty.
    async fn next_id(&self) -> Result<GameId, StoreError>;

    /// Ids of all stored games, ascending.
    async fn list_ids(&self) -> Result<Vec<GameId>, StoreError>;
}

// =============================================================================
// PER-GAME LOCK TABLE
// =============================================================================

/// Async mutex table keyed by game id.
///
/// Operations on the same game serialize; operations on different games
/// run in parallel. Guards are owned so they can be held across await
/// points in the engine's load-mutate-save cycle.
pub struct GameLocks {
    inner: Mutex<BTreeMap<GameId, Arc<Mutex<()>>>>,
}

impl GameLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(BTreeMap::new()),
        }
    }

    /// Acquire the lock for a game id, creating it on first use.
    pub async fn acquire(&self, id: GameId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self.inner.lock().await;
            table
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

impl Default for GameLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_id_serializes() {
        let locks = GameLocks::new();
        let guard = locks.acquire(7).await;

        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(7)).await;
        assert!(second.is_err(), "second acquire should block while held");

        drop(guard);
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(7)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_different_ids_independent() {
        let locks = GameLocks::new();
        let _guard = locks.acquire(1).await;

        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire(2)).await;
        assert!(other.is_ok(), "different game ids must not contend");
    }
}
