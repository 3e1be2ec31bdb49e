//! Game Lifecycle Module
//!
//! The `Game` aggregate and its state machine. Transitions are pure
//! value transformations; storage and locking live in `store`, and the
//! settlement engine composes the two.

pub mod state;

// Re-export key types
pub use state::{Game, GameId, GamePhase, PlayerSlot, RevealPayload, StakeDescriptor};
