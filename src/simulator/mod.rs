//! Balance simulator for the round engines and progression.
//!
//! Plays the whole catalog with scripted bots to see how long a clear takes,
//! how often each game is lost and what the ledger looks like at the end.
//! Rounds are driven through `RoundSession` with the same inputs and time
//! deltas a UI would send, so results follow real gameplay rules.

mod bots;
mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{GameSummary, SimReport};
pub use runner::{run_simulation, GameTally, RunStats};
