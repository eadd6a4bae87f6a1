//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The two fixed sides of a match: the human and the computer opponent.
//!
//! ## PerPlayer
//!
//! Per-side data storage backed by a two-element array for O(1) access.
//! Supports iteration and indexing by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One side of the match.
///
/// Every match has exactly these two participants. The human edits a keep
/// mask between rolls; the computer's rerolls come from its strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Both sides, human first.
    pub const BOTH: [Player; 2] = [Player::Human, Player::Computer];

    /// Get the raw side index (human = 0, computer = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Human => 0,
            Player::Computer => 1,
        }
    }

    /// The opposing side.
    ///
    /// ```
    /// use dice_duel::core::Player;
    ///
    /// assert_eq!(Player::Human.opponent(), Player::Computer);
    /// assert_eq!(Player::Computer.opponent(), Player::Human);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Computer => write!(f, "computer"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// Backed by a two-element array, one slot per side.
/// Use `PerPlayer::new()` with explicit values, `PerPlayer::with_value()`
/// to set both slots the same, or `PerPlayer::from_fn()` with a factory.
///
/// ## Example
///
/// ```
/// use dice_duel::core::{PerPlayer, Player};
///
/// let mut scores: PerPlayer<u32> = PerPlayer::with_value(0);
///
/// scores[Player::Human] += 18;
/// assert_eq!(scores[Player::Human], 18);
/// assert_eq!(scores[Player::Computer], 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    data: [T; 2],
}

impl<T> PerPlayer<T> {
    /// Create with explicit values, human slot first.
    #[must_use]
    pub const fn new(human: T, computer: T) -> Self {
        Self {
            data: [human, computer],
        }
    }

    /// Create with both slots set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Human), factory(Player::Computer)],
        }
    }

    /// Get a reference to one side's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to one side's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs, human first.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::BOTH.iter().copied().zip(self.data.iter())
    }

    /// Apply a function to both slots, producing a new map.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PerPlayer<U> {
        PerPlayer::new(f(&self.data[0]), f(&self.data[1]))
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
