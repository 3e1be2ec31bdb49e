//! Core deterministic primitives.
//!
//! Pure data types and resolution arithmetic. Everything here is a
//! total function of its inputs so settlement can be re-run by any
//! party and always land on the same outcome.

pub mod address;
pub mod resolver;
pub mod team;
pub mod traits;

// Re-export core types
pub use address::Address;
pub use resolver::{resolve_match, resolve_round, MatchOutcome, RoundOutcome};
pub use team::{Team, TeamMember, TeamViolation, RARE_BACKGROUNDS, TEAM_SIZE};
pub use traits::{TraitVector, TRAIT_COUNT};
