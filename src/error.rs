//! Error Taxonomy
//!
//! Every caller-visible fault of the lifecycle and settlement core.
//! All variants are recoverable: the core returns them and leaves the
//! game record unmutated, it never panics on bad input.

use crate::core::team::TeamViolation;
use crate::game::state::GameId;
use crate::store::StoreError;

/// Faults surfaced by game operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GameError {
    /// Team violates a composition invariant.
    #[error("invalid team: {0}")]
    InvalidTeam(#[from] TeamViolation),

    /// Game already has a second player.
    #[error("game already joined")]
    AlreadyJoined,

    /// This player has already revealed.
    #[error("player already revealed")]
    AlreadyRevealed,

    /// Caller is neither player1 nor player2 of this game.
    #[error("unknown participant")]
    UnknownParticipant,

    /// Recomputed commitment digest differs from the stored one.
    #[error("commitment mismatch")]
    CommitmentMismatch,

    /// Settlement attempted before both players revealed.
    #[error("game not ready to settle")]
    NotReady,

    /// Game has already been settled.
    #[error("game already settled")]
    AlreadySettled,

    /// No game with this id exists in the store.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// Structurally invalid trait or commitment data.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// External store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
