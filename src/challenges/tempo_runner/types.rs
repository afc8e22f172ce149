//! Tempo Shift Runner data structures.

use crate::challenges::RoundResult;
use crate::core::constants::{RUNNER_START_LANE, RUNNER_UPDATE_TICK_MS, TRACK_UNITS};
use crate::progression::{Difficulty, Level};

/// Milliseconds between obstacle spawns.
pub fn beat_interval_ms(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 1200,
        Difficulty::Medium => 900,
        Difficulty::Hard => 700,
    }
}

/// Score needed to win a level.
pub fn target_score(difficulty: Difficulty, level_number: u32) -> u32 {
    match difficulty {
        Difficulty::Easy => 30 + 5 * level_number,
        Difficulty::Medium => 40 + 6 * level_number,
        Difficulty::Hard => 50 + 8 * level_number,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub id: u64,
    pub lane: u8,
    /// Distance travelled in hundredths of the track.
    pub progress: u32,
    /// Whether this obstacle has already counted towards the score.
    pub scored: bool,
}

impl Obstacle {
    /// Position along the track, 0.0 at spawn and 1.0 at the player line.
    pub fn position(&self) -> f64 {
        self.progress as f64 / TRACK_UNITS as f64
    }
}

/// A repeating timer measured on the round's own clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    pub period_ms: u64,
    pub next_due_ms: u64,
}

impl Ticker {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            next_due_ms: period_ms,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.next_due_ms <= now_ms
    }

    pub fn fire(&mut self) {
        self.next_due_ms += self.period_ms;
    }
}

/// Both runner timers. Only exists inside [`RunnerPhase::Running`], so any
/// transition out of running drops them together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerClock {
    pub elapsed_ms: u64,
    pub update: Ticker,
    pub spawn: Ticker,
}

impl RunnerClock {
    pub fn new(beat_interval_ms: u64) -> Self {
        Self {
            elapsed_ms: 0,
            update: Ticker::new(RUNNER_UPDATE_TICK_MS),
            spawn: Ticker::new(beat_interval_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerPhase {
    Idle,
    Running(RunnerClock),
    Won,
    Lost,
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct TempoRunnerGame {
    pub level_id: String,
    pub difficulty: Difficulty,
    pub level_number: u32,
    pub beat_interval_ms: u64,
    pub target_score: u32,
    pub player_lane: u8,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: RunnerPhase,
    pub next_obstacle_id: u64,
    /// Total obstacles spawned this run.
    pub spawned: u32,
}

impl TempoRunnerGame {
    pub fn new(level: &Level) -> Self {
        Self::setup(level.id.clone(), level.difficulty, level.level_number)
    }

    pub fn setup(level_id: String, difficulty: Difficulty, level_number: u32) -> Self {
        Self {
            level_id,
            difficulty,
            level_number,
            beat_interval_ms: beat_interval_ms(difficulty),
            target_score: target_score(difficulty, level_number),
            player_lane: RUNNER_START_LANE,
            obstacles: Vec::new(),
            score: 0,
            phase: RunnerPhase::Idle,
            next_obstacle_id: 0,
            spawned: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, RunnerPhase::Running(_))
    }

    /// True while spawn and update timers are live.
    pub fn is_ticking(&self) -> bool {
        self.is_running()
    }

    pub fn clock(&self) -> Option<&RunnerClock> {
        match &self.phase {
            RunnerPhase::Running(clock) => Some(clock),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<RoundResult> {
        match self.phase {
            RunnerPhase::Won => Some(RoundResult::Win),
            RunnerPhase::Lost => Some(RoundResult::Loss),
            _ => None,
        }
    }

    pub fn obstacles_in_lane(&self, lane: u8) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(move |o| o.lane == lane)
    }
}
