//! Move ordering for alpha-beta search.
//!
//! Good moves first means earlier cutoffs. Scores here only rank moves and
//! have no meaning outside this module.

use std::cmp::Reverse;

use engine_core::lines::completes_line_through;
use engine_core::{BoardState, Cell, Move, SubStatus};

use crate::eval::square_weight;

const GAME_WIN: i32 = 1_000_000;
const TT_MOVE: i32 = 2 * GAME_WIN;
const SUB_WIN: i32 = 10_000;
const BLOCK: i32 = 5_000;
const SENDS_ANYWHERE: i32 = 300;

/// Ordering score of `mv` for the side to move in `state`.
pub fn score_move(state: &BoardState, mv: Move) -> i32 {
    let side = state.turn();
    let (br, bc) = mv.board();
    let (lr, lc) = mv.local();
    let local_idx = lr * 3 + lc;
    let board_weight = square_weight(br, bc);

    let mut sub = state.sub_cells(br, bc);
    sub[local_idx] = side.mark();
    let wins_sub = completes_line_through(&sub, local_idx, side, Cell::owner);

    if wins_sub {
        let mut statuses = state.sub_status_flat();
        let board_idx = br * 3 + bc;
        statuses[board_idx] = side.won_status();
        if completes_line_through(&statuses, board_idx, side, SubStatus::owner) {
            return GAME_WIN;
        }
    }

    let mut score = 0;
    if wins_sub {
        score += SUB_WIN + 100 * board_weight;
    } else {
        let opponent = side.opponent();
        sub[local_idx] = opponent.mark();
        if completes_line_through(&sub, local_idx, opponent, Cell::owner) {
            score += BLOCK + 50 * board_weight;
        }
        sub[local_idx] = side.mark();
    }

    score += 10 * board_weight + 5 * square_weight(lr, lc);

    // Sending the opponent to a decided board, or deciding the board they are
    // sent back to, lets them play anywhere.
    let full_after = sub.iter().all(|c| !c.is_empty());
    let target = mv.target();
    let sends_anywhere = if target == (br, bc) {
        wins_sub || full_after
    } else {
        !state.is_playable(target.0, target.1)
    };
    if sends_anywhere {
        score -= SENDS_ANYWHERE;
    }

    score
}

/// Sort `moves` best first. `tt_move`, when present, goes to the front.
/// The sort is stable, so equal scores keep their row-major order.
pub fn order_moves(state: &BoardState, moves: &mut [Move], tt_move: Option<Move>) {
    moves.sort_by_cached_key(|&mv| {
        if Some(mv) == tt_move {
            Reverse(TT_MOVE)
        } else {
            Reverse(score_move(state, mv))
        }
    });
}
