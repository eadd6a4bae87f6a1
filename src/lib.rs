//! # dice-duel
//!
//! A two-player dice duel engine: human versus computer, racing to a
//! target score with press-your-luck rerolls.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: No rendering, input, or timing. Hosts (a TUI, a
//!    GUI, a bot harness) drive [`GameSession`] and read state back out.
//!
//! 2. **Deterministic**: Every die and every opponent coin-flip comes from
//!    one seeded [`GameRng`]. Same seed, same commands, same match.
//!
//! 3. **Value Semantics**: A session snapshots to a plain serializable
//!    value and restores from it exactly, RNG stream position included.
//!
//! ## Modules
//!
//! - `core`: Players, dice hands, keep masks, RNG, configuration
//! - `scoring`: Hand valuation
//! - `strategy`: The computer's reroll policy
//! - `session`: The turn/match state machine and snapshots

pub mod core;
pub mod scoring;
pub mod strategy;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    validate_target_score, ConfigError, MatchConfig,
    DEFAULT_TARGET_SCORE, MAX_TARGET_SCORE, MIN_TARGET_SCORE,
    Hand, KeepMask, DIE_MAX, DIE_MIN, HAND_SIZE,
    PerPlayer, Player,
    GameRng, GameRngState,
};

pub use crate::scoring::turn_score;

pub use crate::strategy::{HoldAll, RerollDecision, RerollStrategy, SmartStrategy};

pub use crate::session::{
    GameSession, MAX_ROLLS_PER_TURN,
    MatchState, MatchStatus, SessionAction, SessionSnapshot, TurnRecord, TurnState,
};
