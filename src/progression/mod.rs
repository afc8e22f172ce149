//! Level catalog, rewards and the progression engine that owns them.

#![allow(unused_imports)]

pub mod catalog;
pub mod engine;
pub mod persistence;
pub mod rewards;
pub mod types;

pub use catalog::LevelCatalog;
pub use engine::{CompletionReport, ProgressionEngine};
pub use persistence::{DecodedSnapshot, ProgressSnapshot};
pub use rewards::{RewardLedger, RewardType};
pub use types::{level_id, Difficulty, GameType, Level};
