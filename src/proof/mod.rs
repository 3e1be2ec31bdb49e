//! Commit-Reveal Protocol
//!
//! The single anti-cheating control of the game: a team is bound by a
//! hash commitment before the opponent's team is known, and the reveal
//! must reproduce that hash exactly.

pub mod commitment;

// Re-export key types
pub use commitment::{compute_commitment, verify_commitment, Commitment, Salt};
