//! Round And Match Resolution
//!
//! Pure arithmetic over trait vectors. No randomness, no state: the same
//! two teams always produce the same outcome, so settlement can be
//! replayed by any party for verification.
//!
//! Rounds pair teams slot-by-slot (0v0, 1v1, 2v2); slots are never
//! reordered or matched by best fit.

use serde::{Deserialize, Serialize};

use crate::core::team::TEAM_SIZE;
use crate::core::traits::TraitVector;

// =============================================================================
// ROUND RESOLUTION
// =============================================================================

/// Result of a single round between two trait vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Side A took the round.
    pub a_wins: bool,
    /// Side B took the round.
    pub b_wins: bool,
    /// Signed margin (side A core modifier minus side B's); carried into
    /// match aggregation for final tie-breaking.
    pub diff: i64,
}

impl RoundOutcome {
    /// Neither side won the round.
    pub fn is_tie(&self) -> bool {
        !self.a_wins && !self.b_wins
    }
}

/// Resolve one round between two trait vectors.
///
/// Effective attack is attack + agility, effective defense is
/// defense + vitality. Each side's core stat absorbs the damage that
/// gets through; the higher surviving core modifier wins. Equal
/// modifiers fall back to the sum of the four non-core stats. Equal
/// sums are an exact tie.
pub fn resolve_round(a: &TraitVector, b: &TraitVector) -> RoundOutcome {
    let atk_a = a.attack as i64 + a.agility as i64;
    let def_a = a.defense as i64 + a.vitality as i64;
    let core_a = a.core as i64;

    let atk_b = b.attack as i64 + b.agility as i64;
    let def_b = b.defense as i64 + b.vitality as i64;
    let core_b = b.core as i64;

    let dmg_to_a = (atk_b - def_a).max(0);
    let mod_a = (core_a - dmg_to_a).max(0);

    let dmg_to_b = (atk_a - def_b).max(0);
    let mod_b = (core_b - dmg_to_b).max(0);

    let mut a_wins = false;
    let mut b_wins = false;

    if mod_a > mod_b {
        a_wins = true;
    } else if mod_b > mod_a {
        b_wins = true;
    } else {
        // Tie-break on the sum of the four non-core stats.
        let score_a = a.attack as i64 + a.defense as i64 + a.vitality as i64 + a.agility as i64;
        let score_b = b.attack as i64 + b.defense as i64 + b.vitality as i64 + b.agility as i64;

        if score_a > score_b {
            a_wins = true;
        } else if score_b > score_a {
            b_wins = true;
        }
        // else exact tie, neither wins
    }

    RoundOutcome {
        a_wins,
        b_wins,
        diff: mod_a - mod_b,
    }
}

// =============================================================================
// MATCH RESOLUTION
// =============================================================================

/// Final outcome of a 3-round match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Side A won.
    TeamA,
    /// Side B won.
    TeamB,
    /// Exact tie.
    Tie,
}

/// Resolve a full match between two slot-aligned teams.
///
/// Decision order: higher round-win count, then higher total diff,
/// then tie. Total over all well-formed inputs.
pub fn resolve_match(
    team_a: &[TraitVector; TEAM_SIZE],
    team_b: &[TraitVector; TEAM_SIZE],
) -> MatchOutcome {
    let mut points_a = 0u32;
    let mut points_b = 0u32;
    let mut total_diff = 0i64;

    for slot in 0..TEAM_SIZE {
        let round = resolve_round(&team_a[slot], &team_b[slot]);
        if round.a_wins {
            points_a += 1;
        }
        if round.b_wins {
            points_b += 1;
        }
        total_diff += round.diff;
    }

    if points_a > points_b {
        MatchOutcome::TeamA
    } else if points_b > points_a {
        MatchOutcome::TeamB
    } else if total_diff > 0 {
        MatchOutcome::TeamA
    } else if total_diff < 0 {
        MatchOutcome::TeamB
    } else {
        MatchOutcome::Tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vec5(row: [u32; 5]) -> TraitVector {
        TraitVector::new(row[0], row[1], row[2], row[3], row[4])
    }

    const STRONG: [u32; 5] = [10, 10, 10, 10, 10];
    const WEAK: [u32; 5] = [0, 0, 0, 0, 0];
    const MID: [u32; 5] = [5, 5, 5, 5, 5];

    #[test]
    fn test_self_round_is_exact_tie() {
        let v = vec5([3, 1, 4, 1, 5]);
        let round = resolve_round(&v, &v);
        assert!(round.is_tie());
        assert_eq!(round.diff, 0);
    }

    #[test]
    fn test_stronger_vector_wins_round() {
        let round = resolve_round(&vec5(STRONG), &vec5(WEAK));
        assert!(round.a_wins);
        assert!(!round.b_wins);
        assert_eq!(round.diff, 10);
    }

    #[test]
    fn test_score_tiebreak_decides_round() {
        // Both core modifiers land on zero; A's stat sum (20) beats B's (4).
        let a = vec5([5, 5, 5, 5, 0]);
        let b = vec5([1, 1, 1, 1, 0]);
        let round = resolve_round(&a, &b);
        assert!(round.a_wins);
        assert_eq!(round.diff, 0);
    }

    #[test]
    fn test_points_beat_diff() {
        // A takes one round by a wide margin, B takes two narrowly.
        let team_a = [vec5(STRONG), vec5(WEAK), vec5(WEAK)];
        let team_b = [vec5(WEAK), vec5(MID), vec5(MID)];
        assert_eq!(resolve_match(&team_a, &team_b), MatchOutcome::TeamB);
    }

    #[test]
    fn test_equal_points_diff_decides() {
        // One round each (A's by +10, B's by -5) plus an exact tie:
        // points 1-1, total diff +5, A wins.
        let team_a = [vec5(STRONG), vec5(WEAK), vec5(WEAK)];
        let team_b = [vec5(WEAK), vec5(MID), vec5(WEAK)];
        assert_eq!(resolve_match(&team_a, &team_b), MatchOutcome::TeamA);
    }

    #[test]
    fn test_all_rounds_tied_is_match_tie() {
        let team = [vec5(MID), vec5(STRONG), vec5(WEAK)];
        assert_eq!(resolve_match(&team, &team), MatchOutcome::Tie);
    }

    fn arb_vector() -> impl Strategy<Value = TraitVector> {
        (0u32..1000, 0u32..1000, 0u32..1000, 0u32..1000, 0u32..1000)
            .prop_map(|(a, d, v, g, c)| TraitVector::new(a, d, v, g, c))
    }

    fn arb_team() -> impl Strategy<Value = [TraitVector; 3]> {
        [arb_vector(), arb_vector(), arb_vector()]
    }

    proptest! {
        #[test]
        fn prop_round_against_self_is_tie(v in arb_vector()) {
            let round = resolve_round(&v, &v);
            prop_assert!(round.is_tie());
            prop_assert_eq!(round.diff, 0);
        }

        #[test]
        fn prop_round_is_antisymmetric(a in arb_vector(), b in arb_vector()) {
            let fwd = resolve_round(&a, &b);
            let rev = resolve_round(&b, &a);
            prop_assert_eq!(fwd.a_wins, rev.b_wins);
            prop_assert_eq!(fwd.b_wins, rev.a_wins);
            prop_assert_eq!(fwd.diff, -rev.diff);
        }

        #[test]
        fn prop_match_is_deterministic(a in arb_team(), b in arb_team()) {
            prop_assert_eq!(resolve_match(&a, &b), resolve_match(&a, &b));
        }

        #[test]
        fn prop_match_swaps_with_sides(a in arb_team(), b in arb_team()) {
            let expected = match resolve_match(&a, &b) {
                MatchOutcome::TeamA => MatchOutcome::TeamB,
                MatchOutcome::TeamB => MatchOutcome::TeamA,
                MatchOutcome::Tie => MatchOutcome::Tie,
            };
            prop_assert_eq!(resolve_match(&b, &a), expected);
        }
    }
}
