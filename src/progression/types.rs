//! Games, difficulties and level records.

use super::rewards::RewardType;
use serde::{Deserialize, Serialize};

/// The three games in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[serde(rename = "Pulse Grid Path")]
    PulseGridPath,
    #[serde(rename = "Tempo Shift Runner")]
    TempoShiftRunner,
    #[serde(rename = "Shape Echo Fusion")]
    ShapeEchoFusion,
}

impl GameType {
    pub const ALL: [GameType; 3] = [
        GameType::PulseGridPath,
        GameType::TempoShiftRunner,
        GameType::ShapeEchoFusion,
    ];

    /// Key used as the first segment of level ids.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PulseGridPath => "pulseGridPath",
            Self::TempoShiftRunner => "tempoShiftRunner",
            Self::ShapeEchoFusion => "shapeEchoFusion",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PulseGridPath => "Pulse Grid Path",
            Self::TempoShiftRunner => "Tempo Shift Runner",
            Self::ShapeEchoFusion => "Shape Echo Fusion",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PulseGridPath => "Navigate the neon grid by discovering the correct path pattern",
            Self::TempoShiftRunner => "Shift lanes with perfect timing to avoid obstacles",
            Self::ShapeEchoFusion => "Recall and repeat sequences of glowing shapes",
        }
    }

    /// Levels per difficulty tier.
    pub fn levels_per_difficulty(&self) -> u32 {
        match self {
            Self::PulseGridPath => 4,
            Self::TempoShiftRunner => 5,
            Self::ShapeEchoFusion => 6,
        }
    }

    pub fn total_levels(&self) -> u32 {
        self.levels_per_difficulty() * Difficulty::ALL.len() as u32
    }

    /// Reward paid out when a level of this game is won.
    pub fn reward_type(&self) -> RewardType {
        match self {
            Self::PulseGridPath => RewardType::ShardsOfInsight,
            Self::TempoShiftRunner => RewardType::FlowRibbons,
            Self::ShapeEchoFusion => RewardType::RealmEchoes,
        }
    }
}

/// Difficulty tiers. Declaration order is severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Stored name; also the middle segment of level ids.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.name() == name)
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }

    pub fn reward_amount(&self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// The tier whose first level opens once this tier is fully completed.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Easy => Some(Self::Medium),
            Self::Medium => Some(Self::Hard),
            Self::Hard => None,
        }
    }
}

/// Build the string id for a (game, difficulty, level number) triple.
pub fn level_id(game_type: GameType, difficulty: Difficulty, level_number: u32) -> String {
    format!("{}_{}_{}", game_type.key(), difficulty.name(), level_number)
}

/// One playable level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub game_type: GameType,
    pub difficulty: Difficulty,
    pub level_number: u32,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_unlocked: bool,
}

impl Level {
    /// A fresh level. Only the first easy level of a game starts unlocked.
    pub fn new(game_type: GameType, difficulty: Difficulty, level_number: u32) -> Self {
        Self {
            id: level_id(game_type, difficulty, level_number),
            game_type,
            difficulty,
            level_number,
            is_completed: false,
            is_unlocked: difficulty == Difficulty::Easy && level_number == 1,
        }
    }

    pub fn reward_amount(&self) -> u32 {
        self.difficulty.reward_amount()
    }

    pub fn is_in_group(&self, game_type: GameType, difficulty: Difficulty) -> bool {
        self.game_type == game_type && self.difficulty == difficulty
    }
}
