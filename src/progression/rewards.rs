//! Reward types and the reward ledger.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardType {
    #[serde(rename = "Shards of Insight")]
    ShardsOfInsight,
    #[serde(rename = "Flow Ribbons")]
    FlowRibbons,
    #[serde(rename = "Realm Echoes")]
    RealmEchoes,
}

impl RewardType {
    pub const ALL: [RewardType; 3] = [
        RewardType::ShardsOfInsight,
        RewardType::FlowRibbons,
        RewardType::RealmEchoes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ShardsOfInsight => "Shards of Insight",
            Self::FlowRibbons => "Flow Ribbons",
            Self::RealmEchoes => "Realm Echoes",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ShardsOfInsight => {
                "Crystallized fragments of understanding from completed challenges"
            }
            Self::FlowRibbons => "Ethereal strands representing mastery of rhythm and movement",
            Self::RealmEchoes => "Resonant patterns captured from puzzle solutions",
        }
    }
}

/// Collected reward counters. Only ever grows, except on a full reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardLedger {
    #[serde(default)]
    pub shards_of_insight: u32,
    #[serde(default)]
    pub flow_ribbons: u32,
    #[serde(default)]
    pub realm_echoes: u32,
}

impl RewardLedger {
    pub fn add(&mut self, reward_type: RewardType, amount: u32) {
        let counter = match reward_type {
            RewardType::ShardsOfInsight => &mut self.shards_of_insight,
            RewardType::FlowRibbons => &mut self.flow_ribbons,
            RewardType::RealmEchoes => &mut self.realm_echoes,
        };
        *counter = counter.saturating_add(amount);
    }

    pub fn count(&self, reward_type: RewardType) -> u32 {
        match reward_type {
            RewardType::ShardsOfInsight => self.shards_of_insight,
            RewardType::FlowRibbons => self.flow_ribbons,
            RewardType::RealmEchoes => self.realm_echoes,
        }
    }

    pub fn total(&self) -> u32 {
        RewardType::ALL.iter().map(|&t| self.count(t)).sum()
    }
}
