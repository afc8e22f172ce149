//! Pulse Grid Path game logic: path generation, hint timing and tap matching.

use super::types::{PulseGridGame, PulseGridPhase};
use rand::Rng;

/// Input actions for Pulse Grid (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseGridInput {
    /// Tap a cell by row-major index.
    Tap(usize),
    /// Start over with a new path.
    Reset,
}

/// Sample `length` distinct cells of a `grid_side`² grid, uniformly, in random order.
pub fn generate_path<R: Rng>(grid_side: usize, length: usize, rng: &mut R) -> Vec<usize> {
    let cells = grid_side * grid_side;
    let length = length.min(cells);

    // Partial Fisher-Yates: the first `length` slots end up a uniform sample.
    let mut pool: Vec<usize> = (0..cells).collect();
    for i in 0..length {
        let j = rng.gen_range(i..cells);
        pool.swap(i, j);
    }
    pool.truncate(length);
    pool
}

/// Process one input. Returns true if it changed the game.
pub fn process_input<R: Rng>(game: &mut PulseGridGame, input: PulseGridInput, rng: &mut R) -> bool {
    match input {
        PulseGridInput::Tap(cell) => tap_cell(game, cell),
        PulseGridInput::Reset => reset(game, rng),
    }
}

/// Advance the hint by `dt_ms`. When the hint finishes, input opens.
/// Returns true if anything visible changed.
pub fn tick(game: &mut PulseGridGame, dt_ms: u64) -> bool {
    if game.phase != PulseGridPhase::HintReveal {
        return false;
    }

    let changed = game.hint.advance(dt_ms);
    if game.hint.is_terminal() {
        game.phase = PulseGridPhase::Input;
        return true;
    }
    changed
}

/// Tap a cell during input. Ignored outside input, for cells off the grid,
/// and for cells already tapped in this attempt.
pub fn tap_cell(game: &mut PulseGridGame, cell: usize) -> bool {
    if !game.accepts_taps() || cell >= game.cell_count() || game.is_selected(cell) {
        return false;
    }

    game.selected.push(cell);
    let position = game.selected.len() - 1;

    if game.path[position] != cell {
        game.last_miss = Some(cell);
        game.attempts_left = game.attempts_left.saturating_sub(1);
        if game.attempts_left == 0 {
            game.phase = PulseGridPhase::Lost;
        } else {
            game.selected.clear();
        }
        return true;
    }

    game.last_miss = None;
    if game.selected.len() == game.path.len() {
        game.phase = PulseGridPhase::Won;
    }
    true
}

/// Re-run setup for the same level: new path, full budget, hint from the top.
pub fn reset<R: Rng>(game: &mut PulseGridGame, rng: &mut R) -> bool {
    if game.phase == PulseGridPhase::Abandoned {
        return false;
    }
    game.hint.cancel();
    *game = PulseGridGame::setup(
        game.level_id.clone(),
        game.difficulty,
        game.level_number,
        rng,
    );
    true
}

/// Leave the round. The hint stops and the game accepts nothing further.
pub fn abandon(game: &mut PulseGridGame) {
    game.hint.cancel();
    if game.outcome().is_none() {
        game.phase = PulseGridPhase::Abandoned;
    }
}
