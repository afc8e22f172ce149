//! Tempo Shift Runner game logic: timers, obstacle movement, lane input.

use super::types::{Obstacle, RunnerClock, RunnerPhase, TempoRunnerGame};
use crate::core::constants::{
    COLLISION_BAND_HIGH, COLLISION_BAND_LOW, LANE_COUNT, PRUNE_LINE, RUNNER_MAX_FRAME_MS,
    SCORE_LINE, TRACK_STEP,
};
use rand::Rng;

/// Input actions for Tempo Runner (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempoRunnerInput {
    Start,
    SelectLane(u8),
    /// Stop the run and wait at the start line again.
    Reset,
}

pub fn process_input(game: &mut TempoRunnerGame, input: TempoRunnerInput) -> bool {
    match input {
        TempoRunnerInput::Start => start(game),
        TempoRunnerInput::SelectLane(lane) => select_lane(game, lane),
        TempoRunnerInput::Reset => reset(game),
    }
}

/// Start the run. Both timers begin together.
pub fn start(game: &mut TempoRunnerGame) -> bool {
    if game.phase != RunnerPhase::Idle {
        return false;
    }
    game.phase = RunnerPhase::Running(RunnerClock::new(game.beat_interval_ms));
    true
}

/// Move the player to `lane`. Takes effect immediately.
pub fn select_lane(game: &mut TempoRunnerGame, lane: u8) -> bool {
    if lane >= LANE_COUNT || lane == game.player_lane {
        return false;
    }
    if !matches!(game.phase, RunnerPhase::Idle | RunnerPhase::Running(_)) {
        return false;
    }
    game.player_lane = lane;
    true
}

/// Advance the run by `dt_ms` (clamped to one frame's worth).
///
/// Due timers fire in chronological order, the update timer first when both
/// fall on the same millisecond. Processing stops at the first tick that ends
/// the run. Returns true if any timer fired.
pub fn tick<R: Rng>(game: &mut TempoRunnerGame, dt_ms: u64, rng: &mut R) -> bool {
    let RunnerPhase::Running(mut clock) = game.phase else {
        return false;
    };

    let target = clock.elapsed_ms + dt_ms.min(RUNNER_MAX_FRAME_MS);
    let mut changed = false;

    loop {
        let fire_update = match (clock.update.is_due(target), clock.spawn.is_due(target)) {
            (false, false) => break,
            (true, false) => true,
            (false, true) => false,
            (true, true) => clock.update.next_due_ms <= clock.spawn.next_due_ms,
        };

        if fire_update {
            clock.elapsed_ms = clock.update.next_due_ms;
            clock.update.fire();
            step_update(game);
        } else {
            clock.elapsed_ms = clock.spawn.next_due_ms;
            clock.spawn.fire();
            step_spawn(game, rng);
        }
        changed = true;

        if !game.is_running() {
            return true;
        }
    }

    clock.elapsed_ms = target;
    game.phase = RunnerPhase::Running(clock);
    changed
}

/// One update tick: move every obstacle, then check collision, score and prune.
pub fn step_update(game: &mut TempoRunnerGame) {
    if !game.is_running() {
        return;
    }

    for obstacle in &mut game.obstacles {
        obstacle.progress += TRACK_STEP;
    }

    let lane = game.player_lane;
    if game
        .obstacles
        .iter()
        .any(|o| o.lane == lane && in_collision_band(o.progress))
    {
        game.phase = RunnerPhase::Lost;
        return;
    }

    for obstacle in &mut game.obstacles {
        if obstacle.progress > SCORE_LINE && !obstacle.scored {
            obstacle.scored = true;
            game.score += 1;
        }
    }

    game.obstacles.retain(|o| o.progress <= PRUNE_LINE);
}

/// One spawn tick: drop an obstacle in a random lane, then check for the win.
///
/// Only the update tick moves obstacles and detects collisions; a spawn tick
/// leaves every existing obstacle where it is.
pub fn step_spawn<R: Rng>(game: &mut TempoRunnerGame, rng: &mut R) {
    if !game.is_running() {
        return;
    }

    let lane = rng.gen_range(0..LANE_COUNT);
    spawn_obstacle(game, lane);

    if game.score >= game.target_score {
        game.phase = RunnerPhase::Won;
    }
}

/// Place a new obstacle at the start of `lane`.
pub fn spawn_obstacle(game: &mut TempoRunnerGame, lane: u8) {
    game.obstacles.push(Obstacle {
        id: game.next_obstacle_id,
        lane,
        progress: 0,
        scored: false,
    });
    game.next_obstacle_id += 1;
    game.spawned += 1;
}

/// Strictly between the band edges.
pub fn in_collision_band(progress: u32) -> bool {
    progress > COLLISION_BAND_LOW && progress < COLLISION_BAND_HIGH
}

/// No obstacle in `lane` is inside the collision band or within `lookahead`
/// hundredths of entering it.
pub fn lane_is_clear(game: &TempoRunnerGame, lane: u8, lookahead: u32) -> bool {
    let from = COLLISION_BAND_LOW.saturating_sub(lookahead);
    !game
        .obstacles_in_lane(lane)
        .any(|o| o.progress > from && o.progress < COLLISION_BAND_HIGH)
}

/// Drop the run and go back to waiting. Timers are released with the
/// running phase.
pub fn reset(game: &mut TempoRunnerGame) -> bool {
    if game.phase == RunnerPhase::Abandoned {
        return false;
    }
    *game = TempoRunnerGame::setup(game.level_id.clone(), game.difficulty, game.level_number);
    true
}

pub fn abandon(game: &mut TempoRunnerGame) {
    if game.outcome().is_none() {
        game.phase = RunnerPhase::Abandoned;
    }
}
