//! Shape Echo Fusion minigame.
//!
//! A sequence of shapes plays back once the player asks for it, then the
//! player echoes it shape by shape. The first wrong shape ends the round.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
