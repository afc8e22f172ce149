//! Main simulation runner.
//!
//! Each run starts from a fresh in-memory save and keeps playing the first
//! playable, not yet completed level until the catalog is cleared or the
//! round limit is hit. Statistics are gathered from session reports.

use super::bots::play_round;
use super::config::SimConfig;
use super::report::SimReport;
use crate::challenges::RoundSession;
use crate::progression::{Difficulty, GameType, ProgressionEngine, RewardLedger};
use crate::utils::persistence::MemoryStore;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Round counts and time spent in one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameTally {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub play_ms: u64,
}

impl GameTally {
    pub fn win_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.wins as f64 / self.rounds as f64
        }
    }
}

/// Outcome of one simulated playthrough.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub rounds_played: u32,
    /// Indexed like `GameType::ALL`.
    pub games: [GameTally; 3],
    pub play_time_ms: u64,
    pub levels_completed: usize,
    pub rewards: RewardLedger,
    pub highest_difficulty: Difficulty,
    pub cleared: bool,
}

impl RunStats {
    pub fn tally(&self, game_type: GameType) -> &GameTally {
        &self.games[game_slot(game_type)]
    }
}

fn game_slot(game_type: GameType) -> usize {
    GameType::ALL
        .iter()
        .position(|&g| g == game_type)
        .unwrap_or(0)
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} rounds, {} levels, {:.1} min, cleared: {}",
                run_idx + 1,
                config.num_runs,
                run_stats.rounds_played,
                run_stats.levels_completed,
                run_stats.play_time_ms as f64 / 60_000.0,
                run_stats.cleared
            );
        }
        all_runs.push(run_stats);
    }

    SimReport::from_runs(all_runs)
}

/// Play one fresh save as far as the bots can take it.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> RunStats {
    let mut engine = ProgressionEngine::load(MemoryStore::new(), config.progression);
    let mut games = [GameTally::default(); 3];
    let mut rounds_played = 0;
    let mut play_time_ms = 0;

    while rounds_played < config.max_rounds_per_run {
        let Some(level) = engine.catalog().next_playable().cloned() else {
            break;
        };

        let mut session = RoundSession::start(&level, rng);
        play_round(&mut session, config, rng);

        let won = session
            .report(&mut engine)
            .is_some_and(|report| report.won);

        let tally = &mut games[game_slot(level.game_type)];
        tally.rounds += 1;
        tally.play_ms += session.elapsed_ms();
        if won {
            tally.wins += 1;
        } else {
            tally.losses += 1;
        }
        rounds_played += 1;
        play_time_ms += session.elapsed_ms();
    }

    engine.record_play_time((play_time_ms / 60_000) as u32);

    RunStats {
        rounds_played,
        games,
        play_time_ms,
        levels_completed: engine.total_completed_levels(),
        rewards: *engine.rewards(),
        highest_difficulty: engine.highest_difficulty(),
        cleared: engine.catalog().next_playable().is_none()
            && engine.total_completed_levels() == engine.levels().len(),
    }
}
