//! Simulation configuration.

use crate::core::config::ProgressionConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated playthroughs
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Chance that the bot taps the right tile or shape
    pub tap_accuracy: f64,

    /// Chance that the bot reacts to an obstacle heading for its lane
    pub dodge_reliability: f64,

    /// Milliseconds per simulated frame
    pub frame_ms: u64,

    /// Delay between bot taps, in milliseconds
    pub tap_delay_ms: u64,

    /// Give up on a playthrough after this many rounds
    pub max_rounds_per_run: u32,

    /// Progression rules the simulated engine runs under
    pub progression: ProgressionConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            tap_accuracy: 0.97,
            dodge_reliability: 0.98,
            frame_ms: 16,
            tap_delay_ms: 350,
            max_rounds_per_run: 2_000,
            progression: ProgressionConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A handful of runs for a quick sanity check.
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            ..Default::default()
        }
    }

    /// Bots that never miss: measures the minimum time to clear everything.
    pub fn perfect_play() -> Self {
        Self {
            num_runs: 10,
            tap_accuracy: 1.0,
            dodge_reliability: 1.0,
            ..Default::default()
        }
    }
}
