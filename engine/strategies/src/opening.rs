//! Fixed opening replies.

use engine_core::{is_legal, BoardState, Move};

const CENTER: Move = Move { row: 4, col: 4 };

const CORNERS: [Move; 4] = [
    Move { row: 0, col: 0 },
    Move { row: 0, col: 8 },
    Move { row: 8, col: 0 },
    Move { row: 8, col: 8 },
];

/// Book move for the first two plies, if any.
///
/// The opener takes the center cell. The reply takes the first legal outer
/// corner, which only exists when the opener sent it to a corner board.
pub fn book_move(state: &BoardState) -> Option<Move> {
    match state.move_count() {
        0 => Some(CENTER),
        1 => CORNERS
            .iter()
            .copied()
            .find(|mv| is_legal(state, mv.row(), mv.col())),
        _ => None,
    }
}
