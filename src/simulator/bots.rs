//! Scripted players that drive a round session to its outcome.

use super::config::SimConfig;
use crate::challenges::tempo_runner::lane_is_clear;
use crate::challenges::{ActiveRound, RoundInput, RoundSession, Shape};
use crate::core::constants::{
    COLLISION_BAND_HIGH, COLLISION_BAND_LOW, LANE_COUNT, RUNNER_MAX_FRAME_MS,
    RUNNER_UPDATE_TICK_MS,
};
use crate::progression::GameType;
use rand::Rng;
use std::collections::HashSet;

/// Frames a runner round may last before the bot walks away.
const MAX_RUNNER_FRAMES: u32 = 200_000;

/// Play `session` until it has an outcome, or abandon it if the bot gets stuck.
pub(super) fn play_round<R: Rng>(session: &mut RoundSession, config: &SimConfig, rng: &mut R) {
    match session.round().game_type() {
        GameType::PulseGridPath => play_pulse_grid(session, config, rng),
        GameType::ShapeEchoFusion => play_shape_echo(session, config, rng),
        GameType::TempoShiftRunner => play_tempo_runner(session, config, rng),
    }

    if !session.is_finished() {
        session.abandon();
    }
}

/// Tick until no reveal is running.
fn wait_for_reveal<R: Rng>(session: &mut RoundSession, config: &SimConfig, rng: &mut R) {
    while session.round().is_ticking() {
        session.tick(config.frame_ms.max(1), rng);
    }
}

fn play_pulse_grid<R: Rng>(session: &mut RoundSession, config: &SimConfig, rng: &mut R) {
    wait_for_reveal(session, config, rng);

    while !session.is_finished() {
        let Some((target, decoy)) = pulse_grid_choice(session.round(), rng) else {
            return;
        };
        let cell = if rng.gen_bool(config.tap_accuracy.clamp(0.0, 1.0)) {
            target
        } else {
            decoy
        };
        session.tick(config.tap_delay_ms, rng);
        if !session.handle_input(RoundInput::TapTile(cell), rng) {
            return;
        }
    }
}

/// The next correct cell and a wrong one to tap on a miss.
fn pulse_grid_choice<R: Rng>(round: &ActiveRound, rng: &mut R) -> Option<(usize, usize)> {
    let ActiveRound::PulseGrid(game) = round else {
        return None;
    };
    let target = *game.path.get(game.selected.len())?;
    let decoys: Vec<usize> = (0..game.cell_count())
        .filter(|&c| c != target && !game.is_selected(c))
        .collect();
    let decoy = if decoys.is_empty() {
        target
    } else {
        decoys[rng.gen_range(0..decoys.len())]
    };
    Some((target, decoy))
}

fn play_shape_echo<R: Rng>(session: &mut RoundSession, config: &SimConfig, rng: &mut R) {
    if !session.handle_input(RoundInput::Start, rng) {
        return;
    }
    wait_for_reveal(session, config, rng);

    while !session.is_finished() {
        let Some((target, decoy)) = shape_echo_choice(session.round(), rng) else {
            return;
        };
        let shape = if rng.gen_bool(config.tap_accuracy.clamp(0.0, 1.0)) {
            target
        } else {
            decoy
        };
        session.tick(config.tap_delay_ms, rng);
        if !session.handle_input(RoundInput::TapShape(shape), rng) {
            return;
        }
    }
}

fn shape_echo_choice<R: Rng>(round: &ActiveRound, rng: &mut R) -> Option<(Shape, Shape)> {
    let ActiveRound::ShapeEcho(game) = round else {
        return None;
    };
    let target = *game.sequence.get(game.input.len())?;
    let decoys: Vec<Shape> = game
        .alphabet()
        .iter()
        .copied()
        .filter(|&s| s != target)
        .collect();
    let decoy = if decoys.is_empty() {
        target
    } else {
        decoys[rng.gen_range(0..decoys.len())]
    };
    Some((target, decoy))
}

/// Watches its own lane and switches out when an obstacle closes in, unless
/// it fails the reliability roll for that obstacle.
struct DodgeBot {
    lookahead: u32,
    reliability: f64,
    judged: HashSet<u64>,
    ignored: HashSet<u64>,
}

impl DodgeBot {
    fn new(config: &SimConfig) -> Self {
        // Enough warning to react before a full frame of updates lands.
        let updates_per_frame = config.frame_ms.min(RUNNER_MAX_FRAME_MS) / RUNNER_UPDATE_TICK_MS;
        Self {
            lookahead: updates_per_frame as u32 + 2,
            reliability: config.dodge_reliability.clamp(0.0, 1.0),
            judged: HashSet::new(),
            ignored: HashSet::new(),
        }
    }

    fn choose_lane<R: Rng>(&mut self, round: &ActiveRound, rng: &mut R) -> Option<u8> {
        let ActiveRound::TempoRunner(game) = round else {
            return None;
        };

        let from = COLLISION_BAND_LOW.saturating_sub(self.lookahead);
        let mut must_move = false;
        for obstacle in game
            .obstacles_in_lane(game.player_lane)
            .filter(|o| o.progress > from && o.progress < COLLISION_BAND_HIGH)
        {
            if self.judged.insert(obstacle.id) && !rng.gen_bool(self.reliability) {
                self.ignored.insert(obstacle.id);
            }
            if !self.ignored.contains(&obstacle.id) {
                must_move = true;
            }
        }
        if !must_move {
            return None;
        }

        (0..LANE_COUNT)
            .find(|&lane| lane != game.player_lane && lane_is_clear(game, lane, self.lookahead))
    }
}

fn play_tempo_runner<R: Rng>(session: &mut RoundSession, config: &SimConfig, rng: &mut R) {
    if !session.handle_input(RoundInput::Start, rng) {
        return;
    }

    let mut bot = DodgeBot::new(config);
    for _ in 0..MAX_RUNNER_FRAMES {
        if session.is_finished() {
            return;
        }
        if let Some(lane) = bot.choose_lane(session.round(), rng) {
            session.handle_input(RoundInput::SelectLane(lane), rng);
        }
        session.tick(config.frame_ms.max(1), rng);
    }
}
