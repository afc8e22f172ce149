//! Pulse Grid Path minigame.
//!
//! A path of cells on a square grid lights up one cell at a time. Once the
//! hint finishes, the player taps the path back in order. A wrong tap costs
//! an attempt and restarts the input; three misses lose the round.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
