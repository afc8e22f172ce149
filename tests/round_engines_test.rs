//! Round engine integration tests
//!
//! Plays whole rounds through `RoundSession` with elapsed-time deltas and
//! forwards the outcome to a progression engine, checking that timers never
//! outlive the round and that only wins pay out.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use realms::challenges::tempo_runner::{self, spawn_obstacle, step_update};
use realms::challenges::{
    ActiveRound, RoundInput, RoundResult, RoundSession, RunnerPhase, Shape,
};
use realms::core::config::ProgressionConfig;
use realms::progression::{Difficulty, GameType, Level, ProgressionEngine, RewardType};
use realms::utils::persistence::MemoryStore;

const FRAME_MS: u64 = 16;

fn engine() -> ProgressionEngine<MemoryStore> {
    ProgressionEngine::load(MemoryStore::new(), ProgressionConfig::default())
}

fn level(engine: &ProgressionEngine<MemoryStore>, id: &str) -> Level {
    engine.level(id).cloned().expect("level exists")
}

/// Tick in frame-sized steps until no reveal is running.
fn run_reveal(session: &mut RoundSession, rng: &mut ChaCha8Rng) {
    let mut frames = 0;
    while session.round().is_ticking() {
        session.tick(FRAME_MS, rng);
        frames += 1;
        assert!(frames < 10_000, "reveal never finished");
    }
}

// ============================================================================
// Pulse Grid Path
// ============================================================================

#[test]
fn test_pulse_grid_win_awards_shards_and_unlocks_next() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut engine = engine();
    let level = level(&engine, "pulseGridPath_Easy_1");

    let mut session = RoundSession::start(&level, &mut rng);
    run_reveal(&mut session, &mut rng);

    let path = match session.round() {
        ActiveRound::PulseGrid(game) => game.path.clone(),
        _ => panic!("expected a pulse grid round"),
    };
    for cell in path {
        session.handle_input(RoundInput::TapTile(cell), &mut rng);
    }

    let report = session.report(&mut engine).unwrap();
    assert!(report.won);
    assert_eq!(engine.rewards().shards_of_insight, 1);
    assert!(engine.is_playable("pulseGridPath_Easy_2"));
    assert_eq!(
        report.completion.unwrap().reward_type,
        RewardType::ShardsOfInsight
    );
}

#[test]
fn test_pulse_grid_loss_after_three_misses_awards_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut engine = engine();
    let level = level(&engine, "pulseGridPath_Easy_1");

    let mut session = RoundSession::start(&level, &mut rng);
    run_reveal(&mut session, &mut rng);

    for _ in 0..3 {
        let wrong = match session.round() {
            ActiveRound::PulseGrid(game) => (0..game.cell_count())
                .find(|&c| c != game.path[0])
                .unwrap(),
            _ => panic!("expected a pulse grid round"),
        };
        session.handle_input(RoundInput::TapTile(wrong), &mut rng);
    }

    assert_eq!(session.outcome(), Some(RoundResult::Loss));
    let report = session.report(&mut engine).unwrap();
    assert!(!report.won);
    assert_eq!(engine.total_unlocked_rewards(), 0);
    assert!(!engine.is_playable("pulseGridPath_Easy_2"));
}

// ============================================================================
// Shape Echo Fusion
// ============================================================================

#[test]
fn test_shape_echo_needs_explicit_start() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let engine = engine();
    let level = level(&engine, "shapeEchoFusion_Easy_1");

    let mut session = RoundSession::start(&level, &mut rng);
    for _ in 0..100 {
        session.tick(FRAME_MS, &mut rng);
    }
    assert!(!session.handle_input(RoundInput::TapShape(Shape::Circle), &mut rng));
    assert!(!session.round().is_ticking());

    assert!(session.handle_input(RoundInput::Start, &mut rng));
    assert!(session.round().is_ticking());
}

#[test]
fn test_shape_echo_win_awards_realm_echoes() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut engine = engine();
    let level = level(&engine, "shapeEchoFusion_Easy_1");

    let mut session = RoundSession::start(&level, &mut rng);
    session.handle_input(RoundInput::Start, &mut rng);
    run_reveal(&mut session, &mut rng);

    let sequence = match session.round() {
        ActiveRound::ShapeEcho(game) => game.sequence.clone(),
        _ => panic!("expected a shape echo round"),
    };
    assert!(sequence.len() <= 12);
    for shape in sequence {
        session.handle_input(RoundInput::TapShape(shape), &mut rng);
    }

    session.report(&mut engine).unwrap();
    assert_eq!(engine.rewards().realm_echoes, 1);
    assert!(engine.is_playable("shapeEchoFusion_Easy_2"));
}

#[test]
fn test_shape_echo_reset_mid_playback_returns_to_idle() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let engine = engine();
    let level = level(&engine, "shapeEchoFusion_Easy_1");

    let mut session = RoundSession::start(&level, &mut rng);
    session.handle_input(RoundInput::Start, &mut rng);
    session.tick(1_000, &mut rng);
    assert!(session.handle_input(RoundInput::Reset, &mut rng));

    assert!(!session.round().is_ticking());
    assert!(!session.tick(FRAME_MS, &mut rng));
    assert!(session.outcome().is_none());
}

// ============================================================================
// Tempo Shift Runner
// ============================================================================

#[test]
fn test_runner_collision_loses_and_stops_timers() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let level = Level::new(GameType::TempoShiftRunner, Difficulty::Easy, 1);
    let mut round = ActiveRound::setup(&level, &mut rng);
    round.handle_input(RoundInput::Start, &mut rng);

    let ActiveRound::TempoRunner(game) = &mut round else {
        panic!("expected a runner round");
    };
    spawn_obstacle(game, 1);
    for _ in 0..80 {
        step_update(game);
    }
    assert!(game.is_running());
    step_update(game);
    assert_eq!(game.phase, RunnerPhase::Lost);

    assert!(!round.is_ticking());
    assert!(!round.tick(FRAME_MS, &mut rng));
    assert_eq!(round.outcome(), Some(RoundResult::Loss));
}

#[test]
fn test_runner_played_with_dodging_wins_flow_ribbons() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut engine = engine();
    let level = level(&engine, "tempoShiftRunner_Easy_1");

    let mut session = RoundSession::start(&level, &mut rng);
    assert!(session.handle_input(RoundInput::Start, &mut rng));

    for _ in 0..100_000 {
        if session.is_finished() {
            break;
        }
        let dodge = match session.round() {
            ActiveRound::TempoRunner(game) if !tempo_runner::lane_is_clear(game, game.player_lane, 3) => {
                (0..3).find(|&lane| tempo_runner::lane_is_clear(game, lane, 3))
            }
            _ => None,
        };
        if let Some(lane) = dodge {
            session.handle_input(RoundInput::SelectLane(lane), &mut rng);
        }
        session.tick(FRAME_MS, &mut rng);
    }

    assert_eq!(session.outcome(), Some(RoundResult::Win));
    assert!(!session.round().is_ticking());
    session.report(&mut engine).unwrap();
    assert_eq!(engine.rewards().flow_ribbons, 1);
    assert!(engine.is_playable("tempoShiftRunner_Easy_2"));
}

#[test]
fn test_runner_abandon_mid_run() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut engine = engine();
    let level = level(&engine, "tempoShiftRunner_Easy_1");

    let mut session = RoundSession::start(&level, &mut rng);
    session.handle_input(RoundInput::Start, &mut rng);
    for _ in 0..200 {
        session.tick(FRAME_MS, &mut rng);
    }
    session.abandon();

    assert!(!session.round().is_ticking());
    assert!(!session.tick(FRAME_MS, &mut rng));
    assert!(session.report(&mut engine).is_none());
    assert_eq!(engine.total_games_played(), 0);
}

#[test]
fn test_runner_reset_after_loss_is_blocked_by_session() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let level = Level::new(GameType::TempoShiftRunner, Difficulty::Easy, 1);
    let mut session = RoundSession::start(&level, &mut rng);
    session.handle_input(RoundInput::Start, &mut rng);

    // Stand still until something runs into the centre lane.
    for _ in 0..100_000 {
        if session.is_finished() {
            break;
        }
        session.tick(FRAME_MS, &mut rng);
    }

    assert_eq!(session.outcome(), Some(RoundResult::Loss));
    assert!(!session.handle_input(RoundInput::Reset, &mut rng));
    assert!(matches!(
        session.round(),
        ActiveRound::TempoRunner(game) if game.phase == RunnerPhase::Lost
    ));
}
