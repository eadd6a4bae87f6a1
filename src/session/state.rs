//! Session state types: match totals, turn bookkeeping, history, snapshots.
//!
//! Everything here is a plain value with serde support. The only way any of
//! it changes is through [`GameSession`](super::GameSession) commands.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::config::MatchConfig;
use crate::core::dice::{Hand, KeepMask};
use crate::core::player::{PerPlayer, Player};
use crate::core::rng::GameRngState;

/// Where the match stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Play continues (tie-break rounds included).
    InProgress,
    /// One side reached the target, or took a forced end on points.
    Won(Player),
    /// Forced end with equal scores; nobody credited.
    Draw,
}

impl MatchStatus {
    /// Whether roll/score transitions are over for this match.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, MatchStatus::InProgress)
    }

    /// The winning side, if one was decided.
    #[must_use]
    pub fn winner(self) -> Option<Player> {
        match self {
            MatchStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// Running totals for the current match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Accumulated scores.
    pub scores: PerPlayer<u32>,
    /// Completed non-tie-break turns (both counters advance together).
    pub attempts: PerPlayer<u32>,
    /// In-progress or terminal outcome.
    pub status: MatchStatus,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            scores: PerPlayer::new(0, 0),
            attempts: PerPlayer::new(0, 0),
            status: MatchStatus::InProgress,
        }
    }
}

/// Within-turn bookkeeping.
///
/// The keep mask only means anything between the first and third rolls,
/// outside tie-break; everywhere else it sits at all-false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Rolls taken so far this turn (0 = none yet, 3 = exhausted).
    pub roll_index: u8,
    /// Sudden-death single-roll mode.
    pub tie_break: bool,
    /// The human's retention flags for the next reroll.
    pub keep: KeepMask,
}

/// One completed turn, as a score sheet would show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based ordinal of the completed turn, tie-break rounds included.
    pub turn: u32,
    /// Sum each side banked this turn.
    pub sums: PerPlayer<u32>,
    /// Running totals right after the turn was applied.
    pub totals: PerPlayer<u32>,
    /// Whether this was a tie-break round.
    pub tie_break: bool,
}

/// Commands that would currently change session state.
///
/// Mirrors the product's button enablement so hosts don't re-derive the
/// state-window guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionAction {
    /// `throw_dice` would roll.
    ThrowDice,
    /// `toggle_keep` would flip mask bits.
    ToggleKeep,
    /// `score_turn` would bank the turn early.
    ScoreTurn,
    /// `force_end` would conclude the match on current totals.
    ForceEnd,
}

/// Full value-semantics copy of a session.
///
/// Two snapshots compare equal exactly when the sessions they came from
/// would behave identically from that point on (the RNG stream position is
/// part of the value; the transient roll-in-flight flag is not, since it is
/// always clear at rest).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Target score and original seed.
    pub config: MatchConfig,
    /// Scores, attempts, status.
    pub match_state: MatchState,
    /// Roll index, tie-break flag, keep mask.
    pub turn: TurnState,
    /// Both hands; `None` before the match's first throw.
    pub hands: PerPlayer<Option<Hand>>,
    /// Cumulative match wins per side.
    pub tallies: PerPlayer<u32>,
    /// Whether the current outcome was already credited to the tallies.
    pub outcome_recorded: bool,
    /// Host-facing "this is the match being played" flag.
    pub active: bool,
    /// Completed turns, oldest first.
    pub history: Vector<TurnRecord>,
    /// RNG stream position.
    pub rng: GameRngState,
}

impl SessionSnapshot {
    /// Encode to a compact byte blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a blob produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
