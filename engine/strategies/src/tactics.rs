//! Immediate small-board tactics, checked before the tree search.
//!
//! Medium plays quickly with a small iteration budget and can miss a
//! sub-board that is one move from being taken. This module finds those
//! moves directly.

use std::cmp::Reverse;

use engine_core::{legal_moves, lines, BoardState, Cell, Move, Player, Winner, SUB_SIZE};
use tracing::trace;

/// Super-board weight of each sub-board: center 3, corners 2, edges 1.
const MACRO_WEIGHT: [u8; 9] = [2, 1, 2, 1, 3, 1, 2, 1, 2];

/// A capture or block that needs no search, if one exists.
///
/// Safe captures come first, the most valuable sub-board winning and ties
/// going to the first legal move. A capture is unsafe when some reply wins
/// the whole game for the opponent. Without a safe capture, the move blocks
/// an opponent completion instead.
pub fn tactical_move(state: &BoardState) -> Option<Move> {
    if state.is_terminal() {
        return None;
    }
    let me = state.turn();
    let moves = legal_moves(state);

    let mut captures: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|&mv| completes_sub_line(state, mv, me))
        .collect();
    captures.sort_by_key(|&mv| Reverse(macro_weight(mv)));
    if let Some(mv) = captures.iter().copied().find(|&mv| is_capture_safe(state, mv)) {
        trace!(mv = %mv, candidates = captures.len(), "safe capture");
        return Some(mv);
    }

    let block = moves
        .iter()
        .copied()
        .filter(|&mv| completes_sub_line(state, mv, me.opponent()))
        .min_by_key(|&mv| Reverse(macro_weight(mv)));
    if let Some(mv) = block {
        trace!(mv = %mv, "block");
    }
    block
}

fn macro_weight(mv: Move) -> u8 {
    let (br, bc) = mv.board();
    MACRO_WEIGHT[br * SUB_SIZE + bc]
}

/// Whether `player` marking `mv` completes a line in its sub-board.
fn completes_sub_line(state: &BoardState, mv: Move, player: Player) -> bool {
    let (br, bc) = mv.board();
    let (lr, lc) = mv.local();
    let idx = lr * SUB_SIZE + lc;
    let mut sub = state.sub_cells(br, bc);
    sub[idx] = player.mark();
    lines::completes_line_through(&sub, idx, player, Cell::owner)
}

fn is_capture_safe(state: &BoardState, mv: Move) -> bool {
    let Ok(next) = state.after(mv) else {
        return false;
    };
    if next.is_terminal() {
        return true;
    }
    let opponent_wins = Winner::from_player(next.turn());
    !legal_moves(&next)
        .into_iter()
        .any(|reply| next.after(reply).is_ok_and(|s| s.winner() == opponent_wins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::ActiveBoard;

    fn position(diagram: &str, active: ActiveBoard) -> BoardState {
        let parsed: BoardState = diagram.parse().unwrap();
        BoardState::from_position(*parsed.cells(), parsed.turn(), active).unwrap()
    }

    const CENTER: ActiveBoard = ActiveBoard::Board { row: 1, col: 1 };

    #[test]
    fn test_no_tactic_on_empty_board() {
        assert_eq!(tactical_move(&BoardState::new()), None);
    }

    #[test]
    fn test_takes_small_board() {
        let state = position(
            "
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | X X . | . . .
            . . . | O . . | . . .
            . . . | . . O | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ",
            CENTER,
        );
        assert_eq!(state.turn(), Player::X);
        assert_eq!(tactical_move(&state), Some(Move { row: 3, col: 5 }));
    }

    #[test]
    fn test_blocks_opponent_line() {
        let state = position(
            "
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | O O . | . . .
            . . . | . . X | . . .
            . . . | X . . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ",
            CENTER,
        );
        assert_eq!(state.turn(), Player::X);
        assert_eq!(tactical_move(&state), Some(Move { row: 3, col: 5 }));
    }

    #[test]
    fn test_skips_capture_that_hands_over_the_game() {
        // O holds the two top-left sub-boards and is one move from the
        // third. Taking the center with (3, 5) would send O there.
        let state = position(
            "
            O O O | O O O | . . .
            X . . | X . . | O O .
            . X . | . . X | X . .
            ------+-------+------
            . . . | X X . | . . .
            . . . | X . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ",
            CENTER,
        );
        assert_eq!(state.turn(), Player::X);
        assert!(!is_capture_safe(&state, Move { row: 3, col: 5 }));
        assert_eq!(tactical_move(&state), Some(Move { row: 5, col: 3 }));
    }

    #[test]
    fn test_prefers_center_sub_board() {
        // Free move: X can take the top-middle edge board or the center.
        let state = position(
            "
            . . . | X X . | . . .
            . . . | O . . | . . .
            . . . | . O . | . . .
            ------+-------+------
            . . . | X X . | . . .
            . . . | O . . | . . .
            . . . | . . O | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ",
            ActiveBoard::Any,
        );
        assert_eq!(tactical_move(&state), Some(Move { row: 3, col: 5 }));
    }
}
