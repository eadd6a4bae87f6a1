//! Turn scoring.
//!
//! A turn currently scores as the plain sum of the five final faces. The
//! seam stays separate from [`Hand::sum`] so bonus rules can land here
//! without touching the session machine or the strategy.

use crate::core::dice::Hand;

/// Score one player's finished turn.
#[must_use]
pub fn turn_score(hand: &Hand) -> u32 {
    hand.sum()
}
