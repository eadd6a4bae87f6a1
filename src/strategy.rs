//! Computer reroll policies.
//!
//! Policies are trait-based so the session can take a custom opponent:
//! - `RerollStrategy`: the decision seam between session and opponent
//! - `SmartStrategy`: the shipped risk/value heuristic
//! - `HoldAll`: never rerolls (a deterministic opponent for tests)

use crate::core::dice::{Hand, KeepMask};
use crate::core::rng::GameRng;

/// Hands at or above this sum are always held.
const EXCELLENT_SUM: u32 = 25;

/// Hands below this sum are always rerolled.
const WEAK_SUM: u32 = 15;

/// Hands above this sum (short of excellent) are held.
const STRONG_SUM: u32 = 22;

/// Chance that a middling hand rerolls.
const MIDDLING_REROLL_CHANCE: f64 = 0.7;

/// Lowest face retained on the first reroll.
const FIRST_REROLL_KEEP: u8 = 5;

/// Lowest face retained on the second reroll.
const SECOND_REROLL_KEEP: u8 = 4;

// =============================================================================
// Decision
// =============================================================================

/// What the computer does with its hand this roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RerollDecision {
    /// Whether any dice are resampled at all.
    pub reroll: bool,
    /// Dice retained when `reroll` is set; all-true otherwise.
    pub keep: KeepMask,
}

impl RerollDecision {
    /// Keep the whole hand.
    #[must_use]
    pub const fn hold() -> Self {
        Self {
            reroll: false,
            keep: KeepMask::all(),
        }
    }

    /// Reroll everything outside `keep`.
    #[must_use]
    pub const fn reroll_keeping(keep: KeepMask) -> Self {
        Self { reroll: true, keep }
    }
}

// =============================================================================
// Strategy trait
// =============================================================================

/// Reroll decision policy for the computer side.
pub trait RerollStrategy: Send + Sync {
    /// Decide whether to reroll and which dice to retain.
    ///
    /// `roll_index` is the number of rolls already taken this turn. Any
    /// probabilistic branch draws from `rng`, so a seeded session replays
    /// identically.
    fn decide(
        &self,
        hand: &Hand,
        roll_index: u8,
        computer_score: u32,
        target_score: u32,
        rng: &mut GameRng,
    ) -> RerollDecision;
}

// =============================================================================
// Shipped heuristic
// =============================================================================

/// Risk/value heuristic: hold winning or strong hands, reroll weak ones,
/// gamble on the middle band.
///
/// The thresholds are product behavior; changing any of them changes how
/// often the opponent presses its luck.
#[derive(Clone, Debug, Default)]
pub struct SmartStrategy;

impl RerollStrategy for SmartStrategy {
    fn decide(
        &self,
        hand: &Hand,
        roll_index: u8,
        computer_score: u32,
        target_score: u32,
        rng: &mut GameRng,
    ) -> RerollDecision {
        // No rolls left to spend.
        if roll_index >= 2 {
            return RerollDecision::hold();
        }

        let sum = hand.sum();

        // Standing pat already wins.
        if computer_score + sum >= target_score {
            return RerollDecision::hold();
        }

        // Excellent roll.
        if sum >= EXCELLENT_SUM {
            return RerollDecision::hold();
        }

        let reroll = if sum < WEAK_SUM {
            true
        } else if sum > STRONG_SUM {
            false
        } else {
            rng.chance(MIDDLING_REROLL_CHANCE)
        };

        if !reroll {
            return RerollDecision::hold();
        }

        let threshold = if roll_index == 0 {
            FIRST_REROLL_KEEP
        } else {
            SECOND_REROLL_KEEP
        };
        RerollDecision::reroll_keeping(KeepMask::keeping(hand, |v| v >= threshold))
    }
}

// =============================================================================
// Test opponent
// =============================================================================

/// Strategy that never rerolls, whatever the hand.
///
/// Useful when a test needs the computer's dice to sit still.
#[derive(Clone, Debug, Default)]
pub struct HoldAll;

impl RerollStrategy for HoldAll {
    fn decide(
        &self,
        _hand: &Hand,
        _roll_index: u8,
        _computer_score: u32,
        _target_score: u32,
        _rng: &mut GameRng,
    ) -> RerollDecision {
        RerollDecision::hold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_constructors() {
        let hold = RerollDecision::hold();
        assert!(!hold.reroll);
        assert_eq!(hold.keep, KeepMask::all());

        let keep = KeepMask::new([true, false, false, false, true]);
        let reroll = RerollDecision::reroll_keeping(keep);
        assert!(reroll.reroll);
        assert_eq!(reroll.keep, keep);
    }

    #[test]
    fn test_holds_when_rolls_exhausted() {
        let mut rng = GameRng::new(42);
        // Weakest possible hand, but the third roll is already spent.
        let hand = Hand::new([1, 1, 1, 1, 1]);

        let decision = SmartStrategy.decide(&hand, 2, 0, 101, &mut rng);
        assert_eq!(decision, RerollDecision::hold());
    }

    #[test]
    fn test_holds_on_immediate_win() {
        let mut rng = GameRng::new(42);
        // 90 banked + 12 on the table reaches 101, so a weak sum still holds.
        let hand = Hand::new([2, 2, 2, 3, 3]);

        let decision = SmartStrategy.decide(&hand, 0, 90, 101, &mut rng);
        assert_eq!(decision, RerollDecision::hold());
    }

    #[test]
    fn test_holds_excellent_hand() {
        let mut rng = GameRng::new(42);
        let hand = Hand::new([5, 5, 5, 5, 5]);

        let decision = SmartStrategy.decide(&hand, 0, 0, 101, &mut rng);
        assert_eq!(decision, RerollDecision::hold());
    }

    #[test]
    fn test_weak_hand_always_rerolls() {
        let mut rng = GameRng::new(42);
        let hand = Hand::new([2, 2, 2, 3, 3]);

        for _ in 0..50 {
            let decision = SmartStrategy.decide(&hand, 0, 0, 101, &mut rng);
            assert!(decision.reroll);
        }
    }

    #[test]
    fn test_strong_hand_stands() {
        let mut rng = GameRng::new(42);
        // 23 sits above the gamble band but short of excellent.
        let hand = Hand::new([5, 5, 5, 4, 4]);

        for _ in 0..50 {
            let decision = SmartStrategy.decide(&hand, 0, 0, 101, &mut rng);
            assert_eq!(decision, RerollDecision::hold());
        }
    }

    #[test]
    fn test_first_reroll_keeps_fives_and_up() {
        let mut rng = GameRng::new(42);
        // Sum 14: reroll is certain, so the keep rule is observable.
        let hand = Hand::new([5, 6, 1, 1, 1]);

        let decision = SmartStrategy.decide(&hand, 0, 0, 101, &mut rng);
        assert!(decision.reroll);
        assert_eq!(decision.keep.flags(), [true, true, false, false, false]);
    }

    #[test]
    fn test_second_reroll_keeps_fours_and_up() {
        let mut rng = GameRng::new(42);
        let hand = Hand::new([4, 5, 1, 2, 2]);

        let decision = SmartStrategy.decide(&hand, 1, 0, 101, &mut rng);
        assert!(decision.reroll);
        assert_eq!(decision.keep.flags(), [true, true, false, false, false]);
    }

    #[test]
    fn test_hold_all_never_rerolls() {
        let mut rng = GameRng::new(42);
        let hand = Hand::new([1, 1, 1, 1, 1]);

        assert_eq!(
            HoldAll.decide(&hand, 0, 0, 101, &mut rng),
            RerollDecision::hold()
        );
    }
}
