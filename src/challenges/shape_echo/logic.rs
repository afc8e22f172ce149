//! Shape Echo Fusion game logic.

use super::types::{Shape, ShapeEchoGame, ShapeEchoPhase};
use rand::Rng;

/// Input actions for Shape Echo (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeEchoInput {
    StartPlayback,
    Tap(Shape),
    /// Back to idle with the same sequence.
    Reset,
}

/// Sample `length` shapes from `alphabet`, repeats allowed.
pub fn generate_sequence<R: Rng>(alphabet: &[Shape], length: usize, rng: &mut R) -> Vec<Shape> {
    if alphabet.is_empty() {
        return Vec::new();
    }
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Process one input. Returns true if it was handled.
pub fn process_input(game: &mut ShapeEchoGame, input: ShapeEchoInput) -> bool {
    match input {
        ShapeEchoInput::StartPlayback => start_playback(game),
        ShapeEchoInput::Tap(shape) => tap_shape(game, shape),
        ShapeEchoInput::Reset => reset(game),
    }
}

/// Begin playback. Only valid from idle.
pub fn start_playback(game: &mut ShapeEchoGame) -> bool {
    if game.phase != ShapeEchoPhase::Idle {
        return false;
    }
    game.input.clear();
    game.playback = game.playback_timeline();
    game.phase = ShapeEchoPhase::Playback;
    true
}

/// Advance playback by `dt_ms`; recall opens once the timeline finishes.
pub fn tick(game: &mut ShapeEchoGame, dt_ms: u64) -> bool {
    if game.phase != ShapeEchoPhase::Playback {
        return false;
    }

    let changed = game.playback.advance(dt_ms);
    if game.playback.is_terminal() {
        game.phase = ShapeEchoPhase::Recall;
        return true;
    }
    changed
}

/// Echo one shape. The first mismatch loses the round outright.
pub fn tap_shape(game: &mut ShapeEchoGame, shape: Shape) -> bool {
    if game.phase != ShapeEchoPhase::Recall || !game.alphabet().contains(&shape) {
        return false;
    }

    game.input.push(shape);
    let position = game.input.len() - 1;

    if game.sequence[position] != shape {
        game.attempts_left = game.attempts_left.saturating_sub(1);
        game.phase = ShapeEchoPhase::Lost;
        return true;
    }

    if game.input.len() == game.sequence.len() {
        game.phase = ShapeEchoPhase::Won;
    }
    true
}

/// Cancel any playback and return to idle. The sequence and the remaining
/// attempts carry over.
pub fn reset(game: &mut ShapeEchoGame) -> bool {
    if game.phase == ShapeEchoPhase::Abandoned {
        return false;
    }
    game.playback.cancel();
    game.input.clear();
    game.phase = ShapeEchoPhase::Idle;
    true
}

/// Re-run setup for the same level with a freshly drawn sequence.
pub fn reroll<R: Rng>(game: &mut ShapeEchoGame, rng: &mut R) {
    game.playback.cancel();
    *game = ShapeEchoGame::setup(
        game.level_id.clone(),
        game.difficulty,
        game.level_number,
        rng,
    );
}

pub fn abandon(game: &mut ShapeEchoGame) {
    game.playback.cancel();
    if game.outcome().is_none() {
        game.phase = ShapeEchoPhase::Abandoned;
    }
}
