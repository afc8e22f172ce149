//! One play session of one level.
//!
//! Wraps an [`ActiveRound`] and guarantees a single terminal outcome: the
//! first win or loss closes the session, and only a win is forwarded to the
//! progression engine.

use super::{ActiveRound, RoundInput, RoundResult};
use crate::progression::{CompletionReport, GameType, Level, ProgressionEngine};
use crate::utils::persistence::ProgressStore;
use rand::Rng;

/// What a session reported when it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub level_id: String,
    pub game_type: GameType,
    pub won: bool,
    /// Time the round ran, as supplied through `tick`.
    pub elapsed_ms: u64,
    /// Present only for wins the engine accepted.
    pub completion: Option<CompletionReport>,
}

#[derive(Debug, Clone)]
pub struct RoundSession {
    round: ActiveRound,
    outcome: Option<RoundResult>,
    reported: bool,
    elapsed_ms: u64,
}

impl RoundSession {
    pub fn start<R: Rng>(level: &Level, rng: &mut R) -> Self {
        Self {
            round: ActiveRound::setup(level, rng),
            outcome: None,
            reported: false,
            elapsed_ms: 0,
        }
    }

    pub fn round(&self) -> &ActiveRound {
        &self.round
    }

    pub fn outcome(&self) -> Option<RoundResult> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_reported(&self) -> bool {
        self.reported
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Forward an input. Ignored once the session has an outcome.
    pub fn handle_input<R: Rng>(&mut self, input: RoundInput, rng: &mut R) -> bool {
        if self.is_finished() {
            return false;
        }
        let handled = self.round.handle_input(input, rng);
        self.latch_outcome();
        handled
    }

    pub fn tick<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed_ms += dt_ms;
        let changed = self.round.tick(dt_ms, rng);
        self.latch_outcome();
        changed
    }

    /// Leave without finishing. Timers stop and nothing is reported.
    pub fn abandon(&mut self) {
        self.round.abandon();
    }

    fn latch_outcome(&mut self) {
        if self.outcome.is_none() {
            self.outcome = self.round.outcome();
        }
    }

    /// Report the outcome to `engine`, once. Wins complete the level with the
    /// game's reward; losses change nothing. Returns `None` while the round is
    /// still in play or after the outcome has already been reported.
    pub fn report<S: ProgressStore>(
        &mut self,
        engine: &mut ProgressionEngine<S>,
    ) -> Option<SessionReport> {
        let outcome = self.outcome?;
        if self.reported {
            return None;
        }
        self.reported = true;

        let game_type = self.round.game_type();
        let level_id = self.round.level_id().to_string();
        let completion = if outcome.won() {
            engine.complete_level(&level_id, game_type.reward_type())
        } else {
            tracing::debug!(level_id = %level_id, "Round lost");
            None
        };

        Some(SessionReport {
            level_id,
            game_type,
            won: outcome.won(),
            elapsed_ms: self.elapsed_ms,
            completion,
        })
    }
}
