//! Dice hands and keep masks.
//!
//! ## Hand
//!
//! Exactly five die faces. Rolling and rerolling are the only ways a hand
//! changes, and both go through [`GameRng`], so a seeded session replays
//! identically.
//!
//! ## KeepMask
//!
//! Per-die retention flags applied on a reroll. The fixed array lengths make
//! the hand/mask shape a compile-time guarantee instead of a runtime check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::core::rng::GameRng;

/// Number of dice in a hand.
pub const HAND_SIZE: usize = 5;

/// Smallest die face.
pub const DIE_MIN: u8 = 1;

/// Largest die face.
pub const DIE_MAX: u8 = 6;

/// Five die faces, one hand per player.
///
/// ## Example
///
/// ```
/// use dice_duel::core::Hand;
///
/// let hand = Hand::new([3, 5, 2, 6, 1]);
/// assert_eq!(hand.sum(), 17);
/// assert_eq!(hand[1], 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand([u8; HAND_SIZE]);

impl Hand {
    /// Create a hand from explicit die faces.
    ///
    /// # Panics
    ///
    /// Panics if any face is outside 1..=6.
    #[must_use]
    pub fn new(values: [u8; HAND_SIZE]) -> Self {
        for (i, &v) in values.iter().enumerate() {
            assert!(
                (DIE_MIN..=DIE_MAX).contains(&v),
                "Die {} out of range: {}",
                i,
                v
            );
        }
        Self(values)
    }

    /// Roll five fresh dice.
    #[must_use]
    pub fn roll_all(rng: &mut GameRng) -> Self {
        Self(std::array::from_fn(|_| rng.roll_die()))
    }

    /// Reroll every position the mask does not keep.
    ///
    /// Kept positions are copied unchanged; the RNG is consulted exactly
    /// once per rerolled die, so a resample may land on the same face.
    #[must_use]
    pub fn reroll(&self, keep: KeepMask, rng: &mut GameRng) -> Self {
        let mut values = self.0;
        for (i, v) in values.iter_mut().enumerate() {
            if !keep.is_kept(i) {
                *v = rng.roll_die();
            }
        }
        Self(values)
    }

    /// Sum of the five faces.
    #[must_use]
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&v| u32::from(v)).sum()
    }

    /// The raw die faces.
    #[must_use]
    pub const fn values(&self) -> [u8; HAND_SIZE] {
        self.0
    }
}

impl Index<usize> for Hand {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {} {}]",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4]
        )
    }
}

/// Per-die retention flags for the next reroll.
///
/// `true` keeps the die. Only the human's mask is edited directly; the
/// computer's comes out of its strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeepMask([bool; HAND_SIZE]);

impl KeepMask {
    /// Mask keeping nothing (every die rerolls).
    #[must_use]
    pub const fn none() -> Self {
        Self([false; HAND_SIZE])
    }

    /// Mask keeping every die.
    #[must_use]
    pub const fn all() -> Self {
        Self([true; HAND_SIZE])
    }

    /// Create from explicit flags.
    #[must_use]
    pub const fn new(flags: [bool; HAND_SIZE]) -> Self {
        Self(flags)
    }

    /// Keep exactly the dice `predicate` accepts.
    #[must_use]
    pub fn keeping(hand: &Hand, predicate: impl Fn(u8) -> bool) -> Self {
        let mut flags = [false; HAND_SIZE];
        for (i, flag) in flags.iter_mut().enumerate() {
            *flag = predicate(hand[i]);
        }
        Self(flags)
    }

    /// Whether position `index` is retained.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 5`.
    #[must_use]
    pub fn is_kept(&self, index: usize) -> bool {
        assert!(index < HAND_SIZE, "Keep index out of range: {}", index);
        self.0[index]
    }

    /// Flip one position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 5`.
    pub fn toggle(&mut self, index: usize) {
        assert!(index < HAND_SIZE, "Keep index out of range: {}", index);
        self.0[index] = !self.0[index];
    }

    /// Number of retained dice.
    #[must_use]
    pub fn kept_count(&self) -> usize {
        self.0.iter().filter(|&&kept| kept).count()
    }

    /// The raw flags.
    #[must_use]
    pub const fn flags(&self) -> [bool; HAND_SIZE] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hand_new_and_sum() {
        let hand = Hand::new([1, 2, 3, 4, 5]);

        assert_eq!(hand.sum(), 15);
        assert_eq!(hand.values(), [1, 2, 3, 4, 5]);
        assert_eq!(hand[4], 5);
    }

    #[test]
    #[should_panic(expected = "Die 2 out of range: 7")]
    fn test_hand_rejects_face_above_six() {
        let _ = Hand::new([1, 2, 7, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "Die 0 out of range: 0")]
    fn test_hand_rejects_face_below_one() {
        let _ = Hand::new([0, 2, 3, 4, 5]);
    }

    #[test]
    fn test_roll_all_in_range() {
        let mut rng = GameRng::new(42);

        for _ in 0..200 {
            let hand = Hand::roll_all(&mut rng);
            for &v in hand.values().iter() {
                assert!((DIE_MIN..=DIE_MAX).contains(&v));
            }
        }
    }

    #[test]
    fn test_roll_all_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(Hand::roll_all(&mut rng1), Hand::roll_all(&mut rng2));
    }

    #[test]
    fn test_reroll_preserves_kept_positions() {
        let mut rng = GameRng::new(42);
        let hand = Hand::new([6, 1, 6, 1, 6]);
        let keep = KeepMask::new([true, false, true, false, true]);

        for _ in 0..100 {
            let rerolled = hand.reroll(keep, &mut rng);
            assert_eq!(rerolled[0], 6);
            assert_eq!(rerolled[2], 6);
            assert_eq!(rerolled[4], 6);
        }
    }

    #[test]
    fn test_reroll_keep_all_never_touches_rng() {
        let mut rng = GameRng::new(42);
        let hand = Hand::new([2, 3, 4, 5, 6]);

        let before = rng.state();
        let rerolled = hand.reroll(KeepMask::all(), &mut rng);

        assert_eq!(rerolled, hand);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_reroll_resamples_unkept_positions() {
        let mut rng = GameRng::new(42);
        let hand = Hand::new([1, 1, 1, 1, 1]);

        // A resample may repeat the old face, but over many trials every
        // unkept position must change at least once.
        let mut changed = [false; HAND_SIZE];
        for _ in 0..200 {
            let rerolled = hand.reroll(KeepMask::none(), &mut rng);
            for (i, flag) in changed.iter_mut().enumerate() {
                if rerolled[i] != hand[i] {
                    *flag = true;
                }
            }
        }

        assert_eq!(changed, [true; HAND_SIZE]);
    }

    #[test]
    fn test_keep_mask_basics() {
        let mut mask = KeepMask::none();
        assert_eq!(mask.kept_count(), 0);

        mask.toggle(1);
        mask.toggle(3);
        assert!(mask.is_kept(1));
        assert!(mask.is_kept(3));
        assert!(!mask.is_kept(0));
        assert_eq!(mask.kept_count(), 2);

        mask.toggle(1);
        assert!(!mask.is_kept(1));
        assert_eq!(mask.kept_count(), 1);

        assert_eq!(KeepMask::all().kept_count(), HAND_SIZE);
    }

    #[test]
    #[should_panic(expected = "Keep index out of range: 5")]
    fn test_keep_mask_toggle_out_of_range() {
        let mut mask = KeepMask::none();
        mask.toggle(5);
    }

    #[test]
    fn test_keep_mask_keeping_predicate() {
        let hand = Hand::new([5, 1, 6, 4, 2]);
        let mask = KeepMask::keeping(&hand, |v| v >= 5);

        assert_eq!(mask.flags(), [true, false, true, false, false]);
    }

    #[test]
    fn test_hand_display() {
        let hand = Hand::new([3, 5, 2, 6, 1]);
        assert_eq!(format!("{}", hand), "[3 5 2 6 1]");
    }

    #[test]
    fn test_hand_serde() {
        let hand = Hand::new([2, 4, 6, 1, 3]);
        let json = serde_json::to_string(&hand).unwrap();
        let deserialized: Hand = serde_json::from_str(&json).unwrap();
        assert_eq!(hand, deserialized);
    }

    proptest! {
        #[test]
        fn prop_rolled_hands_stay_in_range(seed in any::<u64>()) {
            let mut rng = GameRng::new(seed);
            let hand = Hand::roll_all(&mut rng);

            for &v in hand.values().iter() {
                prop_assert!((DIE_MIN..=DIE_MAX).contains(&v));
            }
        }

        #[test]
        fn prop_reroll_respects_mask(seed in any::<u64>(), flags in any::<[bool; HAND_SIZE]>()) {
            let mut rng = GameRng::new(seed);
            let hand = Hand::roll_all(&mut rng);
            let keep = KeepMask::new(flags);

            let rerolled = hand.reroll(keep, &mut rng);
            for i in 0..HAND_SIZE {
                if flags[i] {
                    prop_assert_eq!(rerolled[i], hand[i]);
                }
                prop_assert!((DIE_MIN..=DIE_MAX).contains(&rerolled[i]));
            }
        }

        #[test]
        fn prop_sum_matches_arithmetic(values in proptest::array::uniform5(1u8..=6)) {
            let hand = Hand::new(values);
            let expected: u32 = values.iter().map(|&v| u32::from(v)).sum();
            prop_assert_eq!(hand.sum(), expected);
        }
    }
}
