//! Pulse Grid Path data structures.
//!
//! A memory minigame: a path of grid cells lights up one cell at a time, then
//! the player taps the cells back in the same order.

use super::logic::generate_path;
use crate::challenges::timeline::StagedReveal;
use crate::challenges::RoundResult;
use crate::core::constants::{
    PATH_CELL_GAP_MS, PATH_CELL_VISIBLE_MS, PATH_HINT_SETTLE_MS, ROUND_ATTEMPTS,
};
use crate::progression::{Difficulty, Level};
use rand::Rng;

/// Grid side length for a difficulty.
pub fn grid_side(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium => 4,
        Difficulty::Hard => 5,
    }
}

/// Number of cells in the path; never more than the grid holds.
pub fn path_length(difficulty: Difficulty, level_number: u32) -> usize {
    let side = grid_side(difficulty);
    (side + level_number as usize + 2).min(side * side)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseGridPhase {
    /// The path is being shown; taps are ignored.
    HintReveal,
    /// Waiting for the player to tap the path back.
    Input,
    Won,
    Lost,
    /// The player left the round before it finished.
    Abandoned,
}

/// Full state of one Pulse Grid round.
#[derive(Debug, Clone)]
pub struct PulseGridGame {
    pub level_id: String,
    pub difficulty: Difficulty,
    pub level_number: u32,
    pub grid_side: usize,
    /// Cell indices (row-major) in the order they must be tapped.
    pub path: Vec<usize>,
    /// Cells tapped so far in the current attempt.
    pub selected: Vec<usize>,
    pub attempts_left: u32,
    pub phase: PulseGridPhase,
    pub hint: StagedReveal,
    /// Cell of the most recent wrong tap, cleared by the next correct one.
    pub last_miss: Option<usize>,
}

impl PulseGridGame {
    pub fn new<R: Rng>(level: &Level, rng: &mut R) -> Self {
        Self::setup(level.id.clone(), level.difficulty, level.level_number, rng)
    }

    /// Fresh round: new random path, full attempt budget, hint playing.
    pub fn setup<R: Rng>(
        level_id: String,
        difficulty: Difficulty,
        level_number: u32,
        rng: &mut R,
    ) -> Self {
        let grid_side = grid_side(difficulty);
        let path = generate_path(grid_side, path_length(difficulty, level_number), rng);
        let hint = StagedReveal::sequence(
            path.len(),
            PATH_CELL_VISIBLE_MS,
            PATH_CELL_GAP_MS,
            PATH_HINT_SETTLE_MS,
        );

        Self {
            level_id,
            difficulty,
            level_number,
            grid_side,
            path,
            selected: Vec::new(),
            attempts_left: ROUND_ATTEMPTS,
            phase: PulseGridPhase::HintReveal,
            hint,
            last_miss: None,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.grid_side * self.grid_side
    }

    /// Cell lit by the hint right now, if any.
    pub fn hinted_cell(&self) -> Option<usize> {
        if self.phase != PulseGridPhase::HintReveal {
            return None;
        }
        self.hint.highlighted().map(|i| self.path[i])
    }

    pub fn is_selected(&self, cell: usize) -> bool {
        self.selected.contains(&cell)
    }

    pub fn accepts_taps(&self) -> bool {
        self.phase == PulseGridPhase::Input
    }

    pub fn outcome(&self) -> Option<RoundResult> {
        match self.phase {
            PulseGridPhase::Won => Some(RoundResult::Win),
            PulseGridPhase::Lost => Some(RoundResult::Loss),
            _ => None,
        }
    }

    /// True while the hint timeline is still scheduled to advance.
    pub fn is_ticking(&self) -> bool {
        self.phase == PulseGridPhase::HintReveal && !self.hint.is_terminal()
    }
}
