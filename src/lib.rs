//! Realms - mini-game round engines and progression
//!
//! Three round engines (Pulse Grid Path, Shape Echo Fusion, Tempo Shift
//! Runner), the level catalog and reward ledger they feed, and persistence
//! for the player's progress. Presentation lives elsewhere and talks to this
//! crate through round inputs, `tick(dt)` calls and the progression engine.

pub mod challenges;
pub mod core;
pub mod progression;
pub mod simulator;
pub mod utils;
