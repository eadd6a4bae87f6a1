//! Core engine types: players, dice, RNG, configuration.
//!
//! This module contains the fundamental building blocks the session machine
//! is assembled from. Everything here is a plain value type; the only state
//! transitions live in [`crate::session`].

pub mod config;
pub mod dice;
pub mod player;
pub mod rng;

pub use config::{
    validate_target_score, ConfigError, MatchConfig, DEFAULT_TARGET_SCORE, MAX_TARGET_SCORE,
    MIN_TARGET_SCORE,
};
pub use dice::{Hand, KeepMask, DIE_MAX, DIE_MIN, HAND_SIZE};
pub use player::{PerPlayer, Player};
pub use rng::{GameRng, GameRngState};
