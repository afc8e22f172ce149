//! Round engines: Pulse Grid Path, Shape Echo Fusion, Tempo Shift Runner.

#![allow(unused_imports)]

pub mod pulse_grid;
pub mod session;
pub mod shape_echo;
pub mod tempo_runner;
pub mod timeline;

pub use pulse_grid::{PulseGridGame, PulseGridInput, PulseGridPhase};
pub use session::{RoundSession, SessionReport};
pub use shape_echo::{Shape, ShapeEchoGame, ShapeEchoInput, ShapeEchoPhase};
pub use tempo_runner::{Obstacle, RunnerPhase, TempoRunnerGame, TempoRunnerInput};
pub use timeline::{RevealCue, StagedReveal};

use crate::progression::{GameType, Level};
use rand::Rng;

/// Result of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Win,
    Loss,
}

impl RoundResult {
    pub fn won(&self) -> bool {
        matches!(self, Self::Win)
    }
}

/// Player intents a UI can send to any round. Each engine handles the ones
/// that make sense for it and ignores the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundInput {
    TapTile(usize),
    TapShape(Shape),
    SelectLane(u8),
    /// Start echo playback or the runner.
    Start,
    Reset,
}

/// The round being played. Only one can be active at a time.
#[derive(Debug, Clone)]
pub enum ActiveRound {
    PulseGrid(PulseGridGame),
    ShapeEcho(ShapeEchoGame),
    TempoRunner(TempoRunnerGame),
}

impl ActiveRound {
    /// Set up a round for `level`; the engine is chosen by its game type.
    pub fn setup<R: Rng>(level: &Level, rng: &mut R) -> Self {
        match level.game_type {
            GameType::PulseGridPath => Self::PulseGrid(PulseGridGame::new(level, rng)),
            GameType::ShapeEchoFusion => Self::ShapeEcho(ShapeEchoGame::new(level, rng)),
            GameType::TempoShiftRunner => Self::TempoRunner(TempoRunnerGame::new(level)),
        }
    }

    pub fn game_type(&self) -> GameType {
        match self {
            Self::PulseGrid(_) => GameType::PulseGridPath,
            Self::ShapeEcho(_) => GameType::ShapeEchoFusion,
            Self::TempoRunner(_) => GameType::TempoShiftRunner,
        }
    }

    pub fn level_id(&self) -> &str {
        match self {
            Self::PulseGrid(game) => &game.level_id,
            Self::ShapeEcho(game) => &game.level_id,
            Self::TempoRunner(game) => &game.level_id,
        }
    }

    /// Route an input to the engine. Returns false if it was ignored.
    pub fn handle_input<R: Rng>(&mut self, input: RoundInput, rng: &mut R) -> bool {
        match (self, input) {
            (Self::PulseGrid(game), RoundInput::TapTile(cell)) => pulse_grid::tap_cell(game, cell),
            (Self::PulseGrid(game), RoundInput::Reset) => pulse_grid::reset(game, rng),

            (Self::ShapeEcho(game), RoundInput::TapShape(shape)) => {
                shape_echo::tap_shape(game, shape)
            }
            (Self::ShapeEcho(game), RoundInput::Start) => shape_echo::start_playback(game),
            (Self::ShapeEcho(game), RoundInput::Reset) => shape_echo::reset(game),

            (Self::TempoRunner(game), RoundInput::SelectLane(lane)) => {
                tempo_runner::select_lane(game, lane)
            }
            (Self::TempoRunner(game), RoundInput::Start) => tempo_runner::start(game),
            (Self::TempoRunner(game), RoundInput::Reset) => tempo_runner::reset(game),

            _ => false,
        }
    }

    /// Advance timers by `dt_ms`. Returns true if anything changed.
    pub fn tick<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> bool {
        match self {
            Self::PulseGrid(game) => pulse_grid::tick(game, dt_ms),
            Self::ShapeEcho(game) => shape_echo::tick(game, dt_ms),
            Self::TempoRunner(game) => tempo_runner::tick(game, dt_ms, rng),
        }
    }

    pub fn outcome(&self) -> Option<RoundResult> {
        match self {
            Self::PulseGrid(game) => game.outcome(),
            Self::ShapeEcho(game) => game.outcome(),
            Self::TempoRunner(game) => game.outcome(),
        }
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.handle_input(RoundInput::Reset, rng)
    }

    /// Stop every timer. The round accepts nothing further.
    pub fn abandon(&mut self) {
        match self {
            Self::PulseGrid(game) => pulse_grid::abandon(game),
            Self::ShapeEcho(game) => shape_echo::abandon(game),
            Self::TempoRunner(game) => tempo_runner::abandon(game),
        }
    }

    /// True while a reveal or runner timer still needs `tick` calls.
    pub fn is_ticking(&self) -> bool {
        match self {
            Self::PulseGrid(game) => game.is_ticking(),
            Self::ShapeEcho(game) => game.is_ticking(),
            Self::TempoRunner(game) => game.is_ticking(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::Difficulty;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(game_type: GameType) -> (ActiveRound, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let level = Level::new(game_type, Difficulty::Easy, 1);
        (ActiveRound::setup(&level, &mut rng), rng)
    }

    #[test]
    fn test_setup_selects_engine_by_game_type() {
        for game_type in GameType::ALL {
            let (round, _) = setup(game_type);
            assert_eq!(round.game_type(), game_type);
            assert_eq!(round.level_id(), format!("{}_Easy_1", game_type.key()));
            assert!(round.outcome().is_none());
        }
    }

    #[test]
    fn test_mismatched_inputs_ignored() {
        let (mut round, mut rng) = setup(GameType::PulseGridPath);
        assert!(!round.handle_input(RoundInput::TapShape(Shape::Circle), &mut rng));
        assert!(!round.handle_input(RoundInput::SelectLane(0), &mut rng));
        assert!(!round.handle_input(RoundInput::Start, &mut rng));

        let (mut round, mut rng) = setup(GameType::TempoShiftRunner);
        assert!(!round.handle_input(RoundInput::TapTile(0), &mut rng));
        assert!(!round.handle_input(RoundInput::TapShape(Shape::Star), &mut rng));
    }

    #[test]
    fn test_pulse_grid_round_win_through_dispatch() {
        let (mut round, mut rng) = setup(GameType::PulseGridPath);
        while round.is_ticking() {
            round.tick(100, &mut rng);
        }
        let path = match &round {
            ActiveRound::PulseGrid(game) => game.path.clone(),
            _ => unreachable!(),
        };
        for cell in path {
            assert!(round.handle_input(RoundInput::TapTile(cell), &mut rng));
        }
        assert_eq!(round.outcome(), Some(RoundResult::Win));
    }

    #[test]
    fn test_shape_echo_round_through_dispatch() {
        let (mut round, mut rng) = setup(GameType::ShapeEchoFusion);
        assert!(!round.is_ticking());
        assert!(round.handle_input(RoundInput::Start, &mut rng));
        while round.is_ticking() {
            round.tick(100, &mut rng);
        }
        let sequence = match &round {
            ActiveRound::ShapeEcho(game) => game.sequence.clone(),
            _ => unreachable!(),
        };
        for shape in sequence {
            round.handle_input(RoundInput::TapShape(shape), &mut rng);
        }
        assert_eq!(round.outcome(), Some(RoundResult::Win));
    }

    #[test]
    fn test_runner_start_and_abandon() {
        let (mut round, mut rng) = setup(GameType::TempoShiftRunner);
        assert!(round.handle_input(RoundInput::Start, &mut rng));
        assert!(round.is_ticking());

        round.abandon();
        assert!(!round.is_ticking());
        assert!(!round.tick(100, &mut rng));
        assert!(round.outcome().is_none());
    }

    #[test]
    fn test_reset_goes_through_each_engine() {
        for game_type in GameType::ALL {
            let (mut round, mut rng) = setup(game_type);
            round.handle_input(RoundInput::Start, &mut rng);
            assert!(round.reset(&mut rng));
        }
    }

    #[test]
    fn test_round_result_won() {
        assert!(RoundResult::Win.won());
        assert!(!RoundResult::Loss.won());
    }
}
