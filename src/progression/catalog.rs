//! The level catalog: every level of every game, with completion and unlock flags.

use super::types::{level_id, Difficulty, GameType, Level};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of all levels. Order is game, then difficulty, then level number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelCatalog {
    /// Builds the full catalog with only each game's first easy level unlocked.
    pub fn new() -> Self {
        let mut levels = Vec::new();
        for game_type in GameType::ALL {
            for difficulty in Difficulty::ALL {
                for level_number in 1..=game_type.levels_per_difficulty() {
                    levels.push(Level::new(game_type, difficulty, level_number));
                }
            }
        }
        Self { levels }
    }

    /// Wrap a decoded level list. Returns `None` if it is not exactly the
    /// fixed catalog (one record per triple, ids matching their fields) or if
    /// its unlock flags could not have come from propagation.
    pub fn from_levels(levels: Vec<Level>) -> Option<Self> {
        let catalog = Self { levels };
        (catalog.is_well_formed() && catalog.flags_consistent()).then_some(catalog)
    }

    pub fn is_well_formed(&self) -> bool {
        let expected: usize = GameType::ALL.iter().map(|g| g.total_levels() as usize).sum();
        if self.levels.len() != expected {
            return false;
        }

        let mut seen = HashSet::new();
        self.levels.iter().all(|level| {
            level.level_number >= 1
                && level.level_number <= level.game_type.levels_per_difficulty()
                && level.id == level_id(level.game_type, level.difficulty, level.level_number)
                && seen.insert(level.id.clone())
        })
    }

    /// Every unlocked, uncompleted level is an entry level or has a completed
    /// predecessor: the previous level of its group, or the whole previous
    /// tier for a tier's first level.
    pub fn flags_consistent(&self) -> bool {
        self.levels
            .iter()
            .filter(|l| l.is_unlocked && !l.is_completed)
            .all(|l| self.unlock_is_earned(l))
    }

    fn unlock_is_earned(&self, level: &Level) -> bool {
        if level.level_number > 1 {
            return self
                .get(level.game_type, level.difficulty, level.level_number - 1)
                .is_some_and(|prev| prev.is_completed);
        }
        let previous_tier = Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.next() == Some(level.difficulty));
        match previous_tier {
            None => true,
            Some(tier) => self.is_group_completed(level.game_type, tier),
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.id == id)
    }

    pub fn get(&self, game_type: GameType, difficulty: Difficulty, level_number: u32) -> Option<&Level> {
        self.levels.iter().find(|l| {
            l.is_in_group(game_type, difficulty) && l.level_number == level_number
        })
    }

    /// Levels of one (game, difficulty) group, ordered by level number.
    pub fn group(&self, game_type: GameType, difficulty: Difficulty) -> Vec<&Level> {
        let mut group: Vec<&Level> = self
            .levels
            .iter()
            .filter(|l| l.is_in_group(game_type, difficulty))
            .collect();
        group.sort_by_key(|l| l.level_number);
        group
    }

    pub fn is_group_completed(&self, game_type: GameType, difficulty: Difficulty) -> bool {
        let group = self.group(game_type, difficulty);
        !group.is_empty() && group.iter().all(|l| l.is_completed)
    }

    /// Marks a level completed. Returns the level's previous completion flag,
    /// or `None` if the id is unknown.
    pub fn mark_completed(&mut self, id: &str) -> Option<bool> {
        let index = self.position(id)?;
        let was_completed = self.levels[index].is_completed;
        self.levels[index].is_completed = true;
        Some(was_completed)
    }

    /// Unlocks a level. Returns its id if it was previously locked.
    fn unlock(&mut self, game_type: GameType, difficulty: Difficulty, level_number: u32) -> Option<String> {
        let level = self.levels.iter_mut().find(|l| {
            l.is_in_group(game_type, difficulty) && l.level_number == level_number
        })?;
        if level.is_unlocked {
            return None;
        }
        level.is_unlocked = true;
        Some(level.id.clone())
    }

    /// Applies unlock propagation after the level `id` was finished.
    ///
    /// Unlocks the next level of the same group, and if the whole group is now
    /// complete, the first level of the next difficulty tier of the same game.
    /// Nothing happens unless the catalog's own record of `id` is completed.
    /// Returns the ids that went from locked to unlocked.
    pub fn unlock_after(&mut self, id: &str) -> Vec<String> {
        let Some(completed) = self.find(id).filter(|l| l.is_completed) else {
            return Vec::new();
        };
        let game_type = completed.game_type;
        let difficulty = completed.difficulty;
        let level_number = completed.level_number;
        let mut unlocked = Vec::new();

        let successor = self
            .group(game_type, difficulty)
            .into_iter()
            .map(|l| l.level_number)
            .find(|&n| n > level_number);
        if let Some(next_number) = successor {
            unlocked.extend(self.unlock(game_type, difficulty, next_number));
        }

        if self.is_group_completed(game_type, difficulty) {
            if let Some(next_tier) = difficulty.next() {
                unlocked.extend(self.unlock(game_type, next_tier, 1));
            }
        }

        unlocked
    }

    pub fn completed_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_completed).count()
    }

    pub fn unlocked_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_unlocked).count()
    }

    pub fn completed_in_game(&self, game_type: GameType) -> usize {
        self.levels
            .iter()
            .filter(|l| l.game_type == game_type && l.is_completed)
            .count()
    }

    /// First unlocked, not yet completed level in catalog order.
    pub fn next_playable(&self) -> Option<&Level> {
        self.levels.iter().find(|l| l.is_unlocked && !l.is_completed)
    }
}
