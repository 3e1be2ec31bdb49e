//! # Chain Clash Settlement Core
//!
//! Lifecycle state machine and settlement engine for staked 3-round
//! team battles with a commit-reveal team protocol.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CHAIN CLASH SERVER                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── address.rs  - 20-byte account/asset addresses           │
//! │  ├── traits.rs   - 5-stat trait vectors                      │
//! │  ├── team.rs     - Team composition rules                    │
//! │  └── resolver.rs - Round and match resolution                │
//! │                                                              │
//! │  proof/          - Commit-reveal protocol                    │
//! │  └── commitment.rs - Keccak-256 team commitments             │
//! │                                                              │
//! │  game/           - Lifecycle state machine                   │
//! │  └── state.rs    - Game aggregate and transitions            │
//! │                                                              │
//! │  store/          - Pluggable persistence boundary            │
//! │  ├── mod.rs      - GameStore trait, per-game lock table      │
//! │  └── memory.rs   - In-memory reference store                 │
//! │                                                              │
//! │  engine/         - Settlement orchestrator                   │
//! │  └── mod.rs      - create / join / reveal / settle / sweep   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Resolution is a pure function of the two committed teams: no
//! randomness, no clocks, integer arithmetic only. Given the same
//! reveals, settlement produces the same winner on any platform, so
//! any party can replay it for verification.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod engine;
pub mod error;
pub mod game;
pub mod proof;
pub mod store;

// Re-export commonly used types
pub use crate::core::address::Address;
pub use crate::core::resolver::{resolve_match, resolve_round, MatchOutcome, RoundOutcome};
pub use crate::core::team::{Team, TeamMember, TeamViolation, RARE_BACKGROUNDS, TEAM_SIZE};
pub use crate::core::traits::{TraitVector, TRAIT_COUNT};
pub use engine::SettlementEngine;
pub use error::GameError;
pub use game::state::{Game, GameId, GamePhase, RevealPayload, StakeDescriptor};
pub use proof::commitment::{compute_commitment, verify_commitment, Commitment, Salt};
pub use store::{GameLocks, GameStore, MemoryStore, StoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rounds per match (one per team slot).
pub const ROUNDS_PER_MATCH: usize = TEAM_SIZE;
