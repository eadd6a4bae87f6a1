//! Match sessions: the turn state machine, win arbitration, and snapshots.
//!
//! ## Sections
//!
//! - `machine`: [`GameSession`], the driver hosts interact with
//! - `state`: plain-data session types and the serializable snapshot

pub mod machine;
pub mod state;

pub use machine::{GameSession, MAX_ROLLS_PER_TURN};
pub use state::{MatchState, MatchStatus, SessionAction, SessionSnapshot, TurnRecord, TurnState};
