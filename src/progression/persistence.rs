//! Versioned progress snapshot and its self-healing decoder.

use super::catalog::LevelCatalog;
use super::rewards::RewardLedger;
use super::types::{Difficulty, Level};
use crate::core::constants::SAVE_VERSION;
use crate::core::error::{RealmsError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything that is persisted, written as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub version: u32,
    pub game_levels: LevelCatalog,
    pub rewards: RewardLedger,
    pub has_completed_onboarding: bool,
    pub total_play_time_minutes: u32,
    pub total_games_played: u32,
    /// Raw difficulty name. Kept as a string so the lexical watermark
    /// comparison behaves exactly as it always has.
    pub highest_difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            game_levels: LevelCatalog::new(),
            rewards: RewardLedger::default(),
            has_completed_onboarding: false,
            total_play_time_minutes: 0,
            total_games_played: 0,
            highest_difficulty: Difficulty::Easy.name().to_string(),
            saved_at: None,
        }
    }
}

/// Result of decoding a stored document.
#[derive(Debug, Clone)]
pub struct DecodedSnapshot {
    pub snapshot: ProgressSnapshot,
    /// Names of the records that could not be read and were replaced with defaults.
    pub repaired: Vec<&'static str>,
}

impl DecodedSnapshot {
    pub fn needs_rewrite(&self) -> bool {
        !self.repaired.is_empty()
    }
}

impl ProgressSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a stored document record by record.
    ///
    /// A document that is not a JSON object, or that was written by a newer
    /// version, is an error. Individual records that fail to decode fall back
    /// to their defaults and are listed in `repaired`.
    pub fn decode(json: &str) -> Result<DecodedSnapshot> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let defaults = ProgressSnapshot::default();
        let mut repaired = Vec::new();

        let version = match root.get("version") {
            Some(v) => serde_json::from_value::<u32>(v.clone())?,
            None => SAVE_VERSION,
        };
        if version > SAVE_VERSION {
            return Err(RealmsError::UnsupportedVersion {
                found: version,
                supported: SAVE_VERSION,
            });
        }

        let game_levels = match record::<Vec<Level>>(&root, "gameLevels")
            .and_then(LevelCatalog::from_levels)
        {
            Some(catalog) => catalog,
            None => {
                tracing::warn!("Stored level catalog unreadable, rebuilding");
                repaired.push("gameLevels");
                defaults.game_levels.clone()
            }
        };

        let rewards = record_or(&root, "rewards", defaults.rewards, &mut repaired);
        let has_completed_onboarding = record_or(
            &root,
            "hasCompletedOnboarding",
            defaults.has_completed_onboarding,
            &mut repaired,
        );
        let total_play_time_minutes = record_or(
            &root,
            "totalPlayTimeMinutes",
            defaults.total_play_time_minutes,
            &mut repaired,
        );
        let total_games_played = record_or(
            &root,
            "totalGamesPlayed",
            defaults.total_games_played,
            &mut repaired,
        );
        let highest_difficulty = record_or(
            &root,
            "highestDifficulty",
            defaults.highest_difficulty.clone(),
            &mut repaired,
        );
        let saved_at = record::<String>(&root, "savedAt");

        Ok(DecodedSnapshot {
            snapshot: ProgressSnapshot {
                version: SAVE_VERSION,
                game_levels,
                rewards,
                has_completed_onboarding,
                total_play_time_minutes,
                total_games_played,
                highest_difficulty,
                saved_at,
            },
            repaired,
        })
    }
}

fn record<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Option<T> {
    root.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn record_or<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &'static str,
    default: T,
    repaired: &mut Vec<&'static str>,
) -> T {
    match record(root, key) {
        Some(value) => value,
        None => {
            tracing::warn!(record = key, "Stored record unreadable, using default");
            repaired.push(key);
            default
        }
    }
}
