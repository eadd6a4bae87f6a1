//! The turn/match state machine.

use std::cmp::Ordering;

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::config::{validate_target_score, ConfigError, MatchConfig, DEFAULT_TARGET_SCORE};
use crate::core::dice::{Hand, KeepMask, HAND_SIZE};
use crate::core::player::{PerPlayer, Player};
use crate::core::rng::GameRng;
use crate::scoring::turn_score;
use crate::strategy::{RerollStrategy, SmartStrategy};

use super::state::{MatchState, MatchStatus, SessionAction, SessionSnapshot, TurnRecord, TurnState};

/// Rolls allowed per turn: one fresh roll plus two rerolls.
pub const MAX_ROLLS_PER_TURN: u8 = 3;

/// A single human-versus-computer match.
///
/// Owns every piece of game state: turn bookkeeping, running totals, both
/// hands, the RNG, cumulative win tallies, and the turn history. Hosts drive
/// it through the command methods and read it back through the queries.
/// Commands issued outside their valid window return `false` and change
/// nothing; that is the product's "disabled button" semantics, not an error.
///
/// ## Example
///
/// ```
/// use dice_duel::core::MatchConfig;
/// use dice_duel::session::GameSession;
///
/// let mut session = GameSession::new(MatchConfig::default());
///
/// assert!(session.throw_dice());
/// assert_eq!(session.roll_index(), 1);
/// assert!(session.hand(dice_duel::core::Player::Human).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct GameSession<S: RerollStrategy = SmartStrategy> {
    config: MatchConfig,
    match_state: MatchState,
    turn: TurnState,
    hands: PerPlayer<Option<Hand>>,
    tallies: PerPlayer<u32>,
    outcome_recorded: bool,
    active: bool,
    history: Vector<TurnRecord>,
    rng: GameRng,
    strategy: S,
    roll_in_flight: bool,
}

impl GameSession<SmartStrategy> {
    /// Start a match with the shipped opponent heuristic.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_strategy(config, SmartStrategy)
    }

    /// Rebuild a session from a snapshot, shipped heuristic attached.
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let mut session = Self::new(snapshot.config);
        session.restore(snapshot);
        session
    }
}

impl<S: RerollStrategy> GameSession<S> {
    /// Start a match with a custom opponent strategy.
    #[must_use]
    pub fn with_strategy(config: MatchConfig, strategy: S) -> Self {
        Self {
            config,
            match_state: MatchState::default(),
            turn: TurnState::default(),
            hands: PerPlayer::new(None, None),
            tallies: PerPlayer::new(0, 0),
            outcome_recorded: false,
            active: true,
            history: Vector::new(),
            rng: GameRng::new(config.seed),
            strategy,
            roll_in_flight: false,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Score both players race to.
    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.config.target_score
    }

    /// Match totals and status.
    #[must_use]
    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    /// Within-turn bookkeeping.
    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// One side's dice; `None` before the match's first throw.
    #[must_use]
    pub fn hand(&self, player: Player) -> Option<Hand> {
        self.hands[player]
    }

    /// One side's running score.
    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.match_state.scores[player]
    }

    /// One side's completed non-tie-break turns.
    #[must_use]
    pub fn attempts(&self, player: Player) -> u32 {
        self.match_state.attempts[player]
    }

    /// Where the match stands.
    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.match_state.status
    }

    /// The winner, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.match_state.status.winner()
    }

    /// The human's retention flags.
    #[must_use]
    pub fn keep_mask(&self) -> KeepMask {
        self.turn.keep
    }

    /// Rolls taken this turn.
    #[must_use]
    pub fn roll_index(&self) -> u8 {
        self.turn.roll_index
    }

    /// Whether sudden-death single-roll rounds are running.
    #[must_use]
    pub fn is_tie_break(&self) -> bool {
        self.turn.tie_break
    }

    /// Whether a throw is currently being applied.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.roll_in_flight
    }

    /// Matches won per side since the tallies were last cleared.
    #[must_use]
    pub fn tally(&self, player: Player) -> u32 {
        self.tallies[player]
    }

    /// Completed turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// The most recently completed turn.
    #[must_use]
    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.history.back()
    }

    /// Whether the host currently treats this match as the one being played.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether anything has happened this match worth coming back to.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.turn.roll_index > 0
            || self.match_state.scores[Player::Human] > 0
            || self.match_state.scores[Player::Computer] > 0
    }

    /// Commands that would currently change state.
    ///
    /// The product enables its buttons from exactly these windows.
    #[must_use]
    pub fn legal_actions(&self) -> SmallVec<[SessionAction; 4]> {
        let mut actions = SmallVec::new();
        if self.match_state.status.is_terminal() {
            return actions;
        }
        if !self.roll_in_flight {
            actions.push(SessionAction::ThrowDice);
        }
        if self.in_reroll_window() {
            actions.push(SessionAction::ToggleKeep);
            actions.push(SessionAction::ScoreTurn);
        }
        actions.push(SessionAction::ForceEnd);
        actions
    }

    fn in_reroll_window(&self) -> bool {
        !self.turn.tie_break
            && self.turn.roll_index > 0
            && self.turn.roll_index < MAX_ROLLS_PER_TURN
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Flip one retention flag on the human hand.
    ///
    /// Valid between the first and third rolls, outside tie-break; a silent
    /// no-op anywhere else. Returns whether the flag changed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 5`.
    pub fn toggle_keep(&mut self, index: usize) -> bool {
        assert!(index < HAND_SIZE, "Keep index out of range: {}", index);
        if self.match_state.status.is_terminal() || !self.in_reroll_window() {
            return false;
        }
        self.turn.keep.toggle(index);
        true
    }

    /// Roll or reroll both hands.
    ///
    /// The first throw of a turn rolls everything fresh; later throws reroll
    /// the human's unkept dice and let the strategy drive the computer's.
    /// The third roll, and every tie-break roll, banks the turn immediately.
    /// No-op while a throw is being applied or after the match is decided.
    pub fn throw_dice(&mut self) -> bool {
        if self.roll_in_flight || self.match_state.status.is_terminal() {
            return false;
        }
        self.roll_in_flight = true;

        if self.turn.roll_index == 0 {
            self.hands[Player::Human] = Some(Hand::roll_all(&mut self.rng));
            self.hands[Player::Computer] = Some(Hand::roll_all(&mut self.rng));
        } else {
            let human = self.hands[Player::Human].expect("human hand exists after a roll");
            self.hands[Player::Human] = Some(human.reroll(self.turn.keep, &mut self.rng));

            let computer = self.hands[Player::Computer].expect("computer hand exists after a roll");
            let decision = self.strategy.decide(
                &computer,
                self.turn.roll_index,
                self.match_state.scores[Player::Computer],
                self.config.target_score,
                &mut self.rng,
            );
            if decision.reroll {
                self.hands[Player::Computer] = Some(computer.reroll(decision.keep, &mut self.rng));
            }
        }

        self.turn.roll_index = (self.turn.roll_index + 1).min(MAX_ROLLS_PER_TURN);
        self.turn.keep = KeepMask::none();
        trace!(
            roll_index = self.turn.roll_index,
            tie_break = self.turn.tie_break,
            "dice thrown"
        );

        if self.turn.roll_index >= MAX_ROLLS_PER_TURN || self.turn.tie_break {
            self.apply_turn_score();
        }

        self.roll_in_flight = false;
        true
    }

    /// Bank the turn now instead of spending the remaining rolls.
    ///
    /// A no-op at `roll_index == 0` (nothing rolled yet, and the previous
    /// turn must not double-count) or once the match is decided.
    pub fn score_turn(&mut self) -> bool {
        if self.match_state.status.is_terminal() || self.turn.roll_index == 0 {
            return false;
        }
        self.apply_turn_score();
        true
    }

    /// Conclude immediately on current totals.
    ///
    /// An explicit abort path: attempts and tie-break rules are ignored, and
    /// an exact tie is a draw with nobody credited. No-op once decided.
    pub fn force_end(&mut self) -> bool {
        if self.match_state.status.is_terminal() {
            return false;
        }
        let status = match self.match_state.scores[Player::Human]
            .cmp(&self.match_state.scores[Player::Computer])
        {
            Ordering::Greater => MatchStatus::Won(Player::Human),
            Ordering::Less => MatchStatus::Won(Player::Computer),
            Ordering::Equal => MatchStatus::Draw,
        };
        self.conclude(status);
        true
    }

    /// Change the target score between matches.
    ///
    /// Rejected while an undecided match has progress, or when the value
    /// falls outside the accepted range. State is untouched on rejection.
    pub fn set_target_score(&mut self, target: u32) -> Result<(), ConfigError> {
        validate_target_score(target)?;
        if self.match_state.status == MatchStatus::InProgress && self.has_progress() {
            return Err(ConfigError::MatchInProgress);
        }
        self.config.target_score = target;
        Ok(())
    }

    /// Credit a concluded match to the winner's running tally.
    ///
    /// Called by the host when it acknowledges the result; the first call
    /// counts, repeats are ignored, draws credit nobody. Returns whether a
    /// tally changed.
    pub fn record_tally(&mut self) -> bool {
        if self.outcome_recorded {
            return false;
        }
        let winner = match self.match_state.status.winner() {
            Some(winner) => winner,
            None => return false,
        };
        self.tallies[winner] += 1;
        self.outcome_recorded = true;
        debug!(%winner, tally = self.tallies[winner], "match credited");
        true
    }

    /// Park the session (the host navigated away).
    ///
    /// Match state is untouched and every command still works; this is
    /// bookkeeping for "continue game" affordances.
    pub fn suspend(&mut self) {
        self.active = false;
    }

    /// Mark an undecided match as the one being played again.
    pub fn resume(&mut self) -> bool {
        if self.match_state.status.is_terminal() {
            return false;
        }
        self.active = true;
        true
    }

    /// Start a fresh match.
    ///
    /// `preserve_config_and_tallies` keeps the configured target score and
    /// the cumulative win tallies; otherwise both return to defaults. The
    /// RNG keeps its stream position either way.
    pub fn reset(&mut self, preserve_config_and_tallies: bool) {
        if !preserve_config_and_tallies {
            self.config.target_score = DEFAULT_TARGET_SCORE;
            self.tallies = PerPlayer::new(0, 0);
        }
        self.match_state = MatchState::default();
        self.turn = TurnState::default();
        self.hands = PerPlayer::new(None, None);
        self.history = Vector::new();
        self.outcome_recorded = false;
        self.active = true;
        self.roll_in_flight = false;
        debug!(
            target = self.config.target_score,
            preserved = preserve_config_and_tallies,
            "match reset"
        );
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Capture the full session value, including the RNG stream position.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config,
            match_state: self.match_state,
            turn: self.turn,
            hands: self.hands,
            tallies: self.tallies,
            outcome_recorded: self.outcome_recorded,
            active: self.active,
            history: self.history.clone(),
            rng: self.rng.state(),
        }
    }

    /// Overwrite this session with a snapshot, keeping the attached strategy.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) {
        self.config = snapshot.config;
        self.match_state = snapshot.match_state;
        self.turn = snapshot.turn;
        self.hands = snapshot.hands;
        self.tallies = snapshot.tallies;
        self.outcome_recorded = snapshot.outcome_recorded;
        self.active = snapshot.active;
        self.history = snapshot.history.clone();
        self.rng = GameRng::from_state(&snapshot.rng);
        self.roll_in_flight = false;
    }

    // =========================================================================
    // Scoring and arbitration
    // =========================================================================

    /// Bank both sums, advance attempts, reset the turn, arbitrate.
    fn apply_turn_score(&mut self) {
        let human = self.hands[Player::Human].expect("scoring requires a rolled hand");
        let computer = self.hands[Player::Computer].expect("scoring requires a rolled hand");
        let sums = PerPlayer::new(turn_score(&human), turn_score(&computer));

        let was_tie_break = self.turn.tie_break;
        for player in Player::BOTH {
            self.match_state.scores[player] += sums[player];
            if !was_tie_break {
                self.match_state.attempts[player] += 1;
            }
        }

        self.history.push_back(TurnRecord {
            turn: self.history.len() as u32 + 1,
            sums,
            totals: self.match_state.scores,
            tie_break: was_tie_break,
        });

        self.turn.roll_index = 0;
        self.turn.keep = KeepMask::none();

        debug!(
            human_sum = sums[Player::Human],
            computer_sum = sums[Player::Computer],
            human_total = self.match_state.scores[Player::Human],
            computer_total = self.match_state.scores[Player::Computer],
            tie_break = was_tie_break,
            "turn scored"
        );

        self.arbitrate(sums, was_tie_break);
    }

    /// Decide the match after a banked turn.
    fn arbitrate(&mut self, sums: PerPlayer<u32>, was_tie_break: bool) {
        if was_tie_break {
            // Sudden death: strictly higher round sum takes the match,
            // equal sums roll again.
            match sums[Player::Human].cmp(&sums[Player::Computer]) {
                Ordering::Greater => self.conclude(MatchStatus::Won(Player::Human)),
                Ordering::Less => self.conclude(MatchStatus::Won(Player::Computer)),
                Ordering::Equal => debug!("tie-break round drawn, rolling again"),
            }
            return;
        }

        let target = self.config.target_score;
        let human_at = self.match_state.scores[Player::Human] >= target;
        let computer_at = self.match_state.scores[Player::Computer] >= target;

        match (human_at, computer_at) {
            (false, false) => {}
            (true, false) => self.conclude(MatchStatus::Won(Player::Human)),
            (false, true) => self.conclude(MatchStatus::Won(Player::Computer)),
            (true, true) => self.arbitrate_simultaneous(),
        }
    }

    /// Both sides crossed the target on the same turn.
    fn arbitrate_simultaneous(&mut self) {
        let human_attempts = self.match_state.attempts[Player::Human];
        let computer_attempts = self.match_state.attempts[Player::Computer];

        // Earlier arrival wins even on a lower score.
        if human_attempts != computer_attempts {
            let winner = if human_attempts < computer_attempts {
                Player::Human
            } else {
                Player::Computer
            };
            self.conclude(MatchStatus::Won(winner));
            return;
        }

        match self.match_state.scores[Player::Human]
            .cmp(&self.match_state.scores[Player::Computer])
        {
            Ordering::Greater => self.conclude(MatchStatus::Won(Player::Human)),
            Ordering::Less => self.conclude(MatchStatus::Won(Player::Computer)),
            Ordering::Equal => {
                // Dead heat: single-roll rounds until someone pulls ahead.
                self.turn.tie_break = true;
                debug!("tie-break entered");
            }
        }
    }

    /// Set a terminal status and retire the session from active play.
    fn conclude(&mut self, status: MatchStatus) {
        self.match_state.status = status;
        self.active = false;
        debug!(?status, "match decided");
    }
}
