//! Tempo Shift Runner minigame.
//!
//! Obstacles roll down three lanes on the beat. The player switches lanes to
//! stay clear of them and scores one point for every obstacle that makes it
//! past the end of the track. Reach the target score to win; get caught in
//! the collision band and the run is over.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
