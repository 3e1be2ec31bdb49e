//! Game Lifecycle State Machine
//!
//! The `Game` aggregate and its legal transitions:
//!
//! ```text
//! Created --join--> Joined --reveal x2--> Revealed --settle--> Settled
//! ```
//!
//! `Revealed` is reached only once both players have individually
//! revealed. Settlement happens exactly once; a settled game is
//! immutable apart from reads.
//!
//! All transitions here are pure value transformations. Persistence
//! lives behind the store; the settlement engine drives the
//! read-modify-write cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::resolver::{resolve_match, MatchOutcome};
use crate::core::team::{Team, TEAM_SIZE};
use crate::core::traits::TraitVector;
use crate::error::GameError;
use crate::proof::commitment::{verify_commitment, Commitment, Salt};

/// Monotonically increasing game identifier, assigned at creation.
pub type GameId = u64;

// =============================================================================
// SUPPORTING RECORDS
// =============================================================================

/// Stake terms for a game. Opaque to the core; passed through to the
/// settlement boundary untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeDescriptor {
    /// Token identifier (contract address or symbol).
    pub token: String,
    /// Stake amount, kept as a string to avoid precision decisions here.
    pub amount: String,
}

/// A player's reveal, stored verbatim once its commitment verifies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealPayload {
    /// Reveal salt, big-endian uint256.
    pub salt: Salt,
    /// Asset contract addresses in slot order.
    pub asset_addresses: [Address; TEAM_SIZE],
    /// Asset ids in slot order.
    pub asset_ids: [u64; TEAM_SIZE],
    /// Background labels in slot order.
    pub backgrounds: [String; TEAM_SIZE],
}

impl RevealPayload {
    /// Build from boundary-shaped lists. Any list without exactly 3
    /// entries is malformed.
    pub fn from_parts(
        salt: Salt,
        asset_addresses: Vec<Address>,
        asset_ids: Vec<u64>,
        backgrounds: Vec<String>,
    ) -> Result<Self, GameError> {
        fn fixed<T>(values: Vec<T>, what: &str) -> Result<[T; TEAM_SIZE], GameError> {
            let got = values.len();
            values.try_into().map_err(|_| {
                GameError::MalformedInput(format!("reveal needs {} {}, got {}", TEAM_SIZE, what, got))
            })
        }

        Ok(Self {
            salt,
            asset_addresses: fixed(asset_addresses, "asset addresses")?,
            asset_ids: fixed(asset_ids, "asset ids")?,
            backgrounds: fixed(backgrounds, "backgrounds")?,
        })
    }
}

/// Per-player sub-state within a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSlot {
    /// Player account address.
    pub address: Address,
    /// Team commitment recorded when the team was fixed.
    pub commitment: Commitment,
    /// The committed team.
    pub team: Team,
    /// Verified reveal, absent until this player reveals.
    pub reveal: Option<RevealPayload>,
}

impl PlayerSlot {
    fn new(address: Address, commitment: Commitment, team: Team) -> Self {
        Self {
            address,
            commitment,
            team,
            reveal: None,
        }
    }

    /// Has this player revealed?
    pub fn revealed(&self) -> bool {
        self.reveal.is_some()
    }
}

/// Lifecycle phase, derived from the record so the settledAt/outcome
/// invariant cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Creator's team fixed, waiting for an opponent.
    Created,
    /// Both teams fixed, waiting for reveals.
    Joined,
    /// Both players revealed, eligible for settlement.
    Revealed,
    /// Outcome recorded; immutable.
    Settled,
}

// =============================================================================
// GAME AGGREGATE
// =============================================================================

/// The game aggregate root.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique id, max existing + 1 (0 for the first game).
    pub id: GameId,
    /// Creator (player 1) address.
    pub creator: Address,
    /// Stake terms.
    pub stake: StakeDescriptor,
    /// Player 1 sub-state.
    pub player1: PlayerSlot,
    /// Player 2 sub-state, absent until joined.
    pub player2: Option<PlayerSlot>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// When player 2 joined.
    pub player2_joined_at: Option<DateTime<Utc>>,
    /// When the game was settled.
    pub settled_at: Option<DateTime<Utc>>,
    /// Winning address; None for unsettled games and ties.
    pub winner: Option<Address>,
    /// True once settled as an exact tie.
    pub tie: bool,
}

impl Game {
    /// Create a new game with the creator's team and commitment fixed.
    ///
    /// Team validation happens in `Team::try_new` before this is
    /// reachable, so creation itself cannot fail.
    pub fn create(
        id: GameId,
        creator: Address,
        stake: StakeDescriptor,
        team: Team,
        commitment: Commitment,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            creator,
            stake,
            player1: PlayerSlot::new(creator, commitment, team),
            player2: None,
            created_at: now,
            player2_joined_at: None,
            settled_at: None,
            winner: None,
            tie: false,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        if self.settled_at.is_some() {
            GamePhase::Settled
        } else if self.both_revealed() {
            GamePhase::Revealed
        } else if self.player2.is_some() {
            GamePhase::Joined
        } else {
            GamePhase::Created
        }
    }

    /// Has the game been settled?
    pub fn is_settled(&self) -> bool {
        self.settled_at.is_some()
    }

    /// Have both players revealed?
    pub fn both_revealed(&self) -> bool {
        self.player1.revealed()
            && self.player2.as_ref().map(|p| p.revealed()).unwrap_or(false)
    }

    /// Unsettled with both reveals in: ready for `settle`.
    pub fn is_settleable(&self) -> bool {
        !self.is_settled() && self.both_revealed()
    }

    /// Second player joins with their team and commitment.
    pub fn join(
        &mut self,
        player2: Address,
        team: Team,
        commitment: Commitment,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        if self.player2.is_some() {
            return Err(GameError::AlreadyJoined);
        }

        self.player2 = Some(PlayerSlot::new(player2, commitment, team));
        self.player2_joined_at = Some(now);
        Ok(())
    }

    /// Record one player's reveal after verifying it against their
    /// stored commitment.
    ///
    /// On any failure the slot keeps its pre-reveal state.
    pub fn record_reveal(
        &mut self,
        player: Address,
        reveal: RevealPayload,
    ) -> Result<(), GameError> {
        if self.is_settled() {
            return Err(GameError::AlreadySettled);
        }

        let slot = if self.player1.address == player {
            &mut self.player1
        } else {
            match self.player2.as_mut() {
                Some(slot) if slot.address == player => slot,
                _ => return Err(GameError::UnknownParticipant),
            }
        };

        if slot.revealed() {
            return Err(GameError::AlreadyRevealed);
        }

        let ok = verify_commitment(
            &slot.commitment,
            &reveal.salt,
            &reveal.asset_addresses,
            &reveal.asset_ids,
        )?;
        if !ok {
            return Err(GameError::CommitmentMismatch);
        }

        slot.reveal = Some(reveal);
        Ok(())
    }

    /// Re-validate trait structure and extract both slot-aligned trait
    /// sets (player 1 first).
    pub fn slot_traits(
        &self,
    ) -> Result<([TraitVector; TEAM_SIZE], [TraitVector; TEAM_SIZE]), GameError> {
        let player2 = self.player2.as_ref().ok_or(GameError::NotReady)?;
        Ok((
            self.player1.team.slot_vectors()?,
            player2.team.slot_vectors()?,
        ))
    }

    /// Settle the game: resolve the match and record the outcome.
    ///
    /// Preconditions: both players revealed, not already settled. Trait
    /// data is re-validated first; a structurally invalid record is
    /// reported as malformed rather than settled with a guessed winner.
    /// All checks run before any field is written, so a failed call
    /// leaves the game byte-identical.
    pub fn settle(&mut self, now: DateTime<Utc>) -> Result<MatchOutcome, GameError> {
        if self.is_settled() {
            return Err(GameError::AlreadySettled);
        }
        if !self.both_revealed() {
            return Err(GameError::NotReady);
        }

        let (traits1, traits2) = self.slot_traits()?;
        let outcome = resolve_match(&traits1, &traits2);

        let player2 = self.player2.as_ref().ok_or(GameError::NotReady)?;
        match outcome {
            MatchOutcome::TeamA => {
                self.winner = Some(self.player1.address);
                self.tie = false;
            }
            MatchOutcome::TeamB => {
                self.winner = Some(player2.address);
                self.tie = false;
            }
            MatchOutcome::Tie => {
                self.winner = None;
                self.tie = true;
            }
        }
        self.settled_at = Some(now);

        Ok(outcome)
    }
}
