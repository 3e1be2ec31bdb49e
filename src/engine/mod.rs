//! Settlement Engine
//!
//! The single orchestrator every external caller goes through. Each
//! operation runs the full cycle: validate, acquire the per-game lock,
//! load, apply the state-machine transition, persist. An operation
//! either completes its one mutation or persists nothing.
//!
//! Settlement is at-most-once-effective: callers racing to settle the
//! same game serialize on the lock, exactly one performs the
//! transition, and the rest observe `AlreadySettled`.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::core::address::Address;
use crate::core::team::{Team, TeamMember};
use crate::error::GameError;
use crate::game::state::{Game, GameId, RevealPayload, StakeDescriptor};
use crate::proof::commitment::Commitment;
use crate::store::{GameLocks, GameStore};

/// Orchestrates game operations over a pluggable store.
pub struct SettlementEngine<S: GameStore> {
    store: S,
    locks: GameLocks,
    /// Serializes id assignment with the first save.
    create_lock: Mutex<()>,
}

impl<S: GameStore> SettlementEngine<S> {
    /// Create an engine over a store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: GameLocks::new(),
            create_lock: Mutex::new(()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn load_required(&self, id: GameId) -> Result<Game, GameError> {
        self.store
            .load(id)
            .await?
            .ok_or(GameError::NotFound(id))
    }

    /// Create a game: validate the creator's team, assign the next id,
    /// persist the new record.
    pub async fn create_game(
        &self,
        creator: Address,
        stake: StakeDescriptor,
        members: Vec<TeamMember>,
        commitment: Commitment,
    ) -> Result<Game, GameError> {
        let team = Team::try_new(members)?;

        let _guard = self.create_lock.lock().await;
        let id = self.store.next_id().await?;
        let game = Game::create(id, creator, stake, team, commitment, Utc::now());
        self.store.save(&game).await?;

        info!(game_id = id, creator = %creator, "game created");
        Ok(game)
    }

    /// Second player joins an open game.
    pub async fn join_game(
        &self,
        id: GameId,
        player2: Address,
        members: Vec<TeamMember>,
        commitment: Commitment,
    ) -> Result<Game, GameError> {
        let team = Team::try_new(members)?;

        let _guard = self.locks.acquire(id).await;
        let mut game = self.load_required(id).await?;
        game.join(player2, team, commitment, Utc::now())?;
        self.store.save(&game).await?;

        info!(game_id = id, player2 = %player2, "player 2 joined");
        Ok(game)
    }

    /// Record a player's reveal after commitment verification.
    pub async fn record_reveal(
        &self,
        id: GameId,
        player: Address,
        reveal: RevealPayload,
    ) -> Result<Game, GameError> {
        let _guard = self.locks.acquire(id).await;
        let mut game = self.load_required(id).await?;
        game.record_reveal(player, reveal)?;
        self.store.save(&game).await?;

        info!(
            game_id = id,
            player = %player,
            both_revealed = game.both_revealed(),
            "reveal recorded"
        );
        Ok(game)
    }

    /// Settle a game. Idempotent in effect: safe to retry, and safe to
    /// race; late arrivals get `AlreadySettled`.
    pub async fn settle_game(&self, id: GameId) -> Result<Game, GameError> {
        let _guard = self.locks.acquire(id).await;
        let mut game = self.load_required(id).await?;
        let outcome = game.settle(Utc::now())?;
        self.store.save(&game).await?;

        info!(game_id = id, outcome = ?outcome, winner = ?game.winner, "game settled");
        Ok(game)
    }

    /// Read a game without taking its lock.
    pub async fn game(&self, id: GameId) -> Result<Game, GameError> {
        self.load_required(id).await
    }

    /// Sweep the collection and settle every eligible game.
    ///
    /// Games missing a reveal or already settled are skipped; a game
    /// that fails settlement (e.g. a malformed stored record) is logged
    /// and left untouched, never a reason to abort the sweep.
    pub async fn settle_eligible(&self) -> Result<Vec<GameId>, GameError> {
        let ids = self.store.list_ids().await?;
        let mut settled = Vec::new();

        for id in ids {
            let _guard = self.locks.acquire(id).await;
            let mut game = match self.store.load(id).await? {
                Some(game) => game,
                None => continue,
            };
            if !game.is_settleable() {
                continue;
            }

            match game.settle(Utc::now()) {
                Ok(outcome) => {
                    self.store.save(&game).await?;
                    info!(game_id = id, outcome = ?outcome, "game settled by sweep");
                    settled.push(id);
                }
                Err(err) => {
                    warn!(game_id = id, error = %err, "refused to settle game");
                }
            }
        }

        Ok(settled)
    }
}
