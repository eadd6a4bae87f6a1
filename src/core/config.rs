//! Match configuration and target-score validation.
//!
//! A session is configured once at construction: the score both players race
//! to, and the seed its RNG starts from. The target score is the one setting
//! the product exposes to users, so it carries a validated range.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted target score.
pub const MIN_TARGET_SCORE: u32 = 20;

/// Largest accepted target score.
pub const MAX_TARGET_SCORE: u32 = 999;

/// Target score used when none is configured.
pub const DEFAULT_TARGET_SCORE: u32 = 101;

/// Why a configuration change was rejected.
///
/// These are user-input failures, not bugs: state is untouched and the
/// message is suitable for display.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Target score below the accepted range.
    #[error("target score must be at least 20, got {0}")]
    TargetTooLow(u32),
    /// Target score above the accepted range.
    #[error("target score must be at most 999, got {0}")]
    TargetTooHigh(u32),
    /// The target score is immutable while a match is being played.
    #[error("target score cannot change during an active match")]
    MatchInProgress,
}

/// Check a proposed target score against the accepted range.
pub fn validate_target_score(target: u32) -> Result<(), ConfigError> {
    if target < MIN_TARGET_SCORE {
        return Err(ConfigError::TargetTooLow(target));
    }
    if target > MAX_TARGET_SCORE {
        return Err(ConfigError::TargetTooHigh(target));
    }
    Ok(())
}

/// Settings fixed for the duration of one match.
///
/// ## Example
///
/// ```
/// use dice_duel::core::MatchConfig;
///
/// let config = MatchConfig::new(150).unwrap().with_seed(7);
/// assert_eq!(config.target_score, 150);
/// assert_eq!(config.seed, 7);
///
/// assert!(MatchConfig::new(19).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Score a player must reach to win.
    pub target_score: u32,
    /// Seed for the session RNG.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Create a config with a validated target score.
    pub fn new(target_score: u32) -> Result<Self, ConfigError> {
        validate_target_score(target_score)?;
        Ok(Self {
            target_score,
            ..Self::default()
        })
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
