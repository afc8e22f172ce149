//! Runtime configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use super::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How the "highest difficulty reached" watermark compares difficulties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkOrdering {
    /// Compare the stored difficulty names as strings ("Easy" < "Hard" < "Medium").
    /// Matches saves written by earlier releases.
    #[default]
    Lexical,
    /// Compare by severity rank (Easy < Medium < Hard).
    Severity,
}

/// Whether completing an already-completed level pays out again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCompletion {
    #[default]
    Reward,
    NoReward,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub watermark_ordering: WatermarkOrdering,
    pub repeat_completion: RepeatCompletion,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmsConfig {
    /// Directory for the progress file. `None` uses the platform data dir.
    pub save_dir: Option<PathBuf>,
    pub progression: ProgressionConfig,
}

impl RealmsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RealmsConfig::from_toml_str("").unwrap();
        assert_eq!(config, RealmsConfig::default());
        assert_eq!(
            config.progression.watermark_ordering,
            WatermarkOrdering::Lexical
        );
        assert_eq!(config.progression.repeat_completion, RepeatCompletion::Reward);
        assert!(config.save_dir.is_none());
    }

    #[test]
    fn test_full_config_parses() {
        let config = RealmsConfig::from_toml_str(
            r#"
            save_dir = "/tmp/realms"

            [progression]
            watermark_ordering = "severity"
            repeat_completion = "no_reward"
            "#,
        )
        .unwrap();

        assert_eq!(config.save_dir, Some(PathBuf::from("/tmp/realms")));
        assert_eq!(
            config.progression.watermark_ordering,
            WatermarkOrdering::Severity
        );
        assert_eq!(
            config.progression.repeat_completion,
            RepeatCompletion::NoReward
        );
    }

    #[test]
    fn test_partial_progression_table() {
        let config = RealmsConfig::from_toml_str(
            r#"
            [progression]
            watermark_ordering = "severity"
            "#,
        )
        .unwrap();
        assert_eq!(config.progression.repeat_completion, RepeatCompletion::Reward);
    }

    #[test]
    fn test_unknown_ordering_is_an_error() {
        let result = RealmsConfig::from_toml_str(
            r#"
            [progression]
            watermark_ordering = "alphabetical"
            "#,
        );
        assert!(result.is_err());
    }
}
