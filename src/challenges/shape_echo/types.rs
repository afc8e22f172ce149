//! Shape Echo Fusion data structures.

use super::logic::generate_sequence;
use crate::challenges::timeline::StagedReveal;
use crate::challenges::RoundResult;
use crate::core::constants::{
    ECHO_SETTLE_MS, ECHO_SHAPE_GAP_MS, ECHO_SHAPE_VISIBLE_MS, MAX_SEQUENCE_LENGTH, ROUND_ATTEMPTS,
};
use crate::progression::{Difficulty, Level};
use rand::Rng;

/// Shapes that can appear in a sequence. Easier difficulties use a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Diamond,
    Hexagon,
    Star,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Diamond,
        Shape::Hexagon,
        Shape::Star,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Square => "Square",
            Self::Triangle => "Triangle",
            Self::Diamond => "Diamond",
            Self::Hexagon => "Hexagon",
            Self::Star => "Star",
        }
    }
}

/// Shapes in play for a difficulty.
pub fn alphabet(difficulty: Difficulty) -> &'static [Shape] {
    let size = match difficulty {
        Difficulty::Easy => 4,
        Difficulty::Medium => 5,
        Difficulty::Hard => 6,
    };
    &Shape::ALL[..size]
}

pub fn sequence_length(difficulty: Difficulty, level_number: u32) -> usize {
    let n = level_number as usize;
    let raw = match difficulty {
        Difficulty::Easy => 4 + n,
        Difficulty::Medium => 5 + n + 1,
        Difficulty::Hard => 6 + n + 2,
    };
    raw.min(MAX_SEQUENCE_LENGTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeEchoPhase {
    /// Sequence is ready; waiting for the player to start playback.
    Idle,
    Playback,
    Recall,
    Won,
    Lost,
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct ShapeEchoGame {
    pub level_id: String,
    pub difficulty: Difficulty,
    pub level_number: u32,
    pub sequence: Vec<Shape>,
    /// Shapes echoed so far.
    pub input: Vec<Shape>,
    pub attempts_left: u32,
    pub phase: ShapeEchoPhase,
    pub playback: StagedReveal,
}

impl ShapeEchoGame {
    pub fn new<R: Rng>(level: &Level, rng: &mut R) -> Self {
        Self::setup(level.id.clone(), level.difficulty, level.level_number, rng)
    }

    pub fn setup<R: Rng>(
        level_id: String,
        difficulty: Difficulty,
        level_number: u32,
        rng: &mut R,
    ) -> Self {
        let sequence = generate_sequence(
            alphabet(difficulty),
            sequence_length(difficulty, level_number),
            rng,
        );

        Self {
            level_id,
            difficulty,
            level_number,
            sequence,
            input: Vec::new(),
            attempts_left: ROUND_ATTEMPTS,
            phase: ShapeEchoPhase::Idle,
            playback: StagedReveal::finished(),
        }
    }

    /// A fresh playback timeline for the current sequence.
    pub(super) fn playback_timeline(&self) -> StagedReveal {
        StagedReveal::sequence(
            self.sequence.len(),
            ECHO_SHAPE_VISIBLE_MS,
            ECHO_SHAPE_GAP_MS,
            ECHO_SETTLE_MS,
        )
    }

    pub fn alphabet(&self) -> &'static [Shape] {
        alphabet(self.difficulty)
    }

    /// Shape shown by playback right now, if any.
    pub fn shown_shape(&self) -> Option<Shape> {
        if self.phase != ShapeEchoPhase::Playback {
            return None;
        }
        self.playback.highlighted().map(|i| self.sequence[i])
    }

    pub fn outcome(&self) -> Option<RoundResult> {
        match self.phase {
            ShapeEchoPhase::Won => Some(RoundResult::Win),
            ShapeEchoPhase::Lost => Some(RoundResult::Loss),
            _ => None,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.phase == ShapeEchoPhase::Playback && !self.playback.is_terminal()
    }
}
