//! The progression engine: sole owner and writer of the level catalog,
//! reward ledger and play statistics.

use super::catalog::LevelCatalog;
use super::persistence::ProgressSnapshot;
use super::rewards::{RewardLedger, RewardType};
use super::types::{Difficulty, GameType, Level};
use crate::core::config::{ProgressionConfig, RepeatCompletion, WatermarkOrdering};
use crate::core::error::{RealmsError, Result};
use crate::utils::persistence::ProgressStore;

/// What a successful `complete_level` call changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub level_id: String,
    pub reward_type: RewardType,
    /// Amount added to the ledger (0 on a repeat completion under `NoReward`).
    pub reward_awarded: u32,
    pub first_completion: bool,
    /// Levels that went from locked to unlocked.
    pub newly_unlocked: Vec<String>,
    /// False if the write to the store failed; in-memory state is still updated.
    pub persisted: bool,
}

/// Owns all persistent progress. Construct one per app and pass it by `&mut`
/// to whatever reports round outcomes.
pub struct ProgressionEngine<S: ProgressStore> {
    state: ProgressSnapshot,
    store: S,
    config: ProgressionConfig,
}

impl<S: ProgressStore> ProgressionEngine<S> {
    /// Load progress from `store`, repairing or rebuilding whatever cannot be read.
    pub fn load(store: S, config: ProgressionConfig) -> Self {
        let mut engine = Self {
            state: ProgressSnapshot::default(),
            store,
            config,
        };

        match engine.store.read() {
            Ok(Some(json)) => match ProgressSnapshot::decode(&json) {
                Ok(decoded) => {
                    let rewrite = decoded.needs_rewrite();
                    engine.state = decoded.snapshot;
                    if rewrite {
                        engine.persist();
                    }
                }
                // A newer save is left on disk until the first real change.
                Err(e @ RealmsError::UnsupportedVersion { .. }) => {
                    tracing::warn!(error = %e, "Saved progress is from a newer version, starting fresh");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Saved progress unreadable, starting fresh");
                    engine.initialize_catalog();
                }
            },
            Ok(None) => {
                tracing::info!("No saved progress, initializing catalog");
                engine.initialize_catalog();
            }
            // The document may be fine; only a failed read. Play on from a
            // fresh state without touching the store.
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved progress, starting fresh in memory");
            }
        }

        engine
    }

    /// Rebuild the level catalog from scratch and persist it.
    /// Rewards and statistics are left alone.
    pub fn initialize_catalog(&mut self) {
        self.state.game_levels = LevelCatalog::new();
        tracing::info!(levels = self.state.game_levels.len(), "Level catalog initialized");
        self.persist();
    }

    /// Record a won level: mark it completed, pay out, propagate unlocks,
    /// bump the play counter and watermark, then persist.
    ///
    /// Unknown ids are ignored and return `None`.
    pub fn complete_level(&mut self, level_id: &str, reward_type: RewardType) -> Option<CompletionReport> {
        let was_completed = match self.state.game_levels.mark_completed(level_id) {
            Some(was) => was,
            None => {
                tracing::warn!(level_id, "complete_level called with unknown level id");
                return None;
            }
        };
        let level = self.state.game_levels.find(level_id)?.clone();

        let reward_awarded = match (self.config.repeat_completion, was_completed) {
            (RepeatCompletion::NoReward, true) => 0,
            _ => level.reward_amount(),
        };
        self.state.rewards.add(reward_type, reward_awarded);

        let newly_unlocked = self.propagate_unlocks(&level.id);

        self.state.total_games_played = self.state.total_games_played.saturating_add(1);
        self.raise_watermark(level.difficulty);

        tracing::info!(
            level_id,
            reward = reward_type.name(),
            amount = reward_awarded,
            "Level completed"
        );

        let persisted = self.persist();
        Some(CompletionReport {
            level_id: level.id,
            reward_type,
            reward_awarded,
            first_completion: !was_completed,
            newly_unlocked,
            persisted,
        })
    }

    /// Unlock propagation after `level` was completed, persisted if anything
    /// changed. The catalog's own record decides: a level that is not
    /// completed there unlocks nothing.
    pub fn unlock_next_level(&mut self, level: &Level) -> Vec<String> {
        let unlocked = self.propagate_unlocks(&level.id);
        if !unlocked.is_empty() {
            self.persist();
        }
        unlocked
    }

    fn propagate_unlocks(&mut self, level_id: &str) -> Vec<String> {
        let unlocked = self.state.game_levels.unlock_after(level_id);
        for id in &unlocked {
            tracing::debug!(after = %level_id, unlocked = %id, "Level unlocked");
        }
        unlocked
    }

    fn raise_watermark(&mut self, difficulty: Difficulty) {
        let current = &self.state.highest_difficulty;
        let higher = match self.config.watermark_ordering {
            WatermarkOrdering::Lexical => difficulty.name() > current.as_str(),
            WatermarkOrdering::Severity => {
                let current_rank = Difficulty::from_name(current)
                    .unwrap_or(Difficulty::Easy)
                    .rank();
                difficulty.rank() > current_rank
            }
        };
        if higher {
            self.state.highest_difficulty = difficulty.name().to_string();
        }
    }

    /// Wipe all progress: fresh catalog, empty ledger, zeroed statistics.
    /// The onboarding flag survives.
    pub fn reset_all_progress(&mut self) -> bool {
        let onboarding = self.state.has_completed_onboarding;
        self.state = ProgressSnapshot {
            has_completed_onboarding: onboarding,
            ..ProgressSnapshot::default()
        };
        tracing::info!("All progress reset");
        self.persist()
    }

    pub fn complete_onboarding(&mut self) -> bool {
        self.state.has_completed_onboarding = true;
        self.persist()
    }

    pub fn record_play_time(&mut self, minutes: u32) -> bool {
        if minutes == 0 {
            return true;
        }
        self.state.total_play_time_minutes = self.state.total_play_time_minutes.saturating_add(minutes);
        self.persist()
    }

    /// Write the current state. Failures are logged and reported, never fatal.
    fn persist(&mut self) -> bool {
        match self.try_persist() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to save progress");
                false
            }
        }
    }

    fn try_persist(&mut self) -> Result<()> {
        self.state.saved_at = Some(chrono::Utc::now().to_rfc3339());
        let json = self.state.to_json()?;
        self.store.write(&json)
    }

    /// Levels of one game and difficulty, ordered by level number.
    pub fn get_levels(&self, game_type: GameType, difficulty: Difficulty) -> Vec<&Level> {
        self.state.game_levels.group(game_type, difficulty)
    }

    pub fn level(&self, level_id: &str) -> Option<&Level> {
        self.state.game_levels.find(level_id)
    }

    pub fn is_playable(&self, level_id: &str) -> bool {
        self.level(level_id).is_some_and(|l| l.is_unlocked)
    }

    pub fn levels(&self) -> &[Level] {
        self.state.game_levels.levels()
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.state.game_levels
    }

    pub fn rewards(&self) -> &RewardLedger {
        &self.state.rewards
    }

    pub fn total_completed_levels(&self) -> usize {
        self.state.game_levels.completed_count()
    }

    pub fn completed_in_game(&self, game_type: GameType) -> usize {
        self.state.game_levels.completed_in_game(game_type)
    }

    pub fn total_unlocked_rewards(&self) -> u32 {
        self.state.rewards.total()
    }

    pub fn total_games_played(&self) -> u32 {
        self.state.total_games_played
    }

    pub fn total_play_time_minutes(&self) -> u32 {
        self.state.total_play_time_minutes
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.state.has_completed_onboarding
    }

    /// Highest difficulty recorded, falling back to Easy for unknown names.
    pub fn highest_difficulty(&self) -> Difficulty {
        Difficulty::from_name(&self.state.highest_difficulty).unwrap_or(Difficulty::Easy)
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.state
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
