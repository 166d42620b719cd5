//! Uniformly random move selection.

use engine_core::{legal_moves, BoardState, EngineError, Move};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Pick a legal move uniformly at random.
pub fn select_move(state: &BoardState, rng: &mut ChaCha20Rng) -> Result<Move, EngineError> {
    legal_moves(state)
        .choose(rng)
        .copied()
        .ok_or(EngineError::NoLegalMoves)
}
