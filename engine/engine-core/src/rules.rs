//! Rules engine: legal moves, move application and terminal detection.

use crate::board::{ActiveBoard, BoardState, Cell, Move, Player, SubStatus, Winner};
use crate::error::{EngineError, IllegalMoveReason};
use crate::lines;
use crate::{GRID_SIZE, SUB_SIZE};

/// Legal moves for the player on turn, in row-major order.
///
/// With a specific active board, these are the empty cells of that
/// sub-board. With `Any`, they are the empty cells of every undecided
/// sub-board. Empty once the game is decided.
pub fn legal_moves(state: &BoardState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    legal_moves_into(state, &mut moves);
    moves
}

/// Like [`legal_moves`], reusing `out` to avoid allocation in playout loops.
pub fn legal_moves_into(state: &BoardState, out: &mut Vec<Move>) {
    out.clear();
    if state.winner.is_decided() {
        return;
    }

    match state.active_board {
        ActiveBoard::Board { row, col } => {
            push_sub_board_moves(state, row as usize, col as usize, out);
        }
        ActiveBoard::Any => {
            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    if state.cells[row][col].is_empty()
                        && state.sub_status[row / SUB_SIZE][col / SUB_SIZE]
                            == SubStatus::Undecided
                    {
                        out.push(Move {
                            row: row as u8,
                            col: col as u8,
                        });
                    }
                }
            }
        }
    }
}

fn push_sub_board_moves(state: &BoardState, br: usize, bc: usize, out: &mut Vec<Move>) {
    for row in br * SUB_SIZE..(br + 1) * SUB_SIZE {
        for col in bc * SUB_SIZE..(bc + 1) * SUB_SIZE {
            if state.cells[row][col].is_empty() {
                out.push(Move {
                    row: row as u8,
                    col: col as u8,
                });
            }
        }
    }
}

/// Whether `(row, col)` may be played by the player on turn.
pub fn is_legal(state: &BoardState, row: usize, col: usize) -> bool {
    check_move(state, row, col, state.turn).is_ok()
}

fn check_move(
    state: &BoardState,
    row: usize,
    col: usize,
    player: Player,
) -> Result<Move, EngineError> {
    let mv = Move::new(row, col)?;
    let illegal = |reason| EngineError::IllegalMove { row, col, reason };

    if state.winner.is_decided() {
        return Err(illegal(IllegalMoveReason::GameOver));
    }
    if player != state.turn {
        return Err(illegal(IllegalMoveReason::WrongTurn {
            expected: state.turn,
            found: player,
        }));
    }
    if !state.cells[row][col].is_empty() {
        return Err(illegal(IllegalMoveReason::Occupied));
    }
    let (br, bc) = mv.board();
    if let ActiveBoard::Board { row: ar, col: ac } = state.active_board {
        if (ar as usize, ac as usize) != (br, bc) {
            return Err(illegal(IllegalMoveReason::OutsideActiveBoard));
        }
    }
    if state.sub_status[br][bc].is_decided() {
        return Err(illegal(IllegalMoveReason::SubBoardDecided));
    }
    Ok(mv)
}

/// Place `player`'s mark at `(row, col)`.
///
/// On success the owning sub-board's status, the winner, the active board
/// and the turn are all updated. On failure `state` is untouched.
pub fn apply_move(
    state: &mut BoardState,
    row: usize,
    col: usize,
    player: Player,
) -> Result<(), EngineError> {
    let mv = check_move(state, row, col, player)?;
    let (br, bc) = mv.board();
    let (lr, lc) = mv.local();

    state.cells[row][col] = player.mark();

    let sub = state.sub_cells(br, bc);
    let local_idx = lr * SUB_SIZE + lc;
    if lines::completes_line_through(&sub, local_idx, player, Cell::owner) {
        state.sub_status[br][bc] = player.won_status();
    } else if sub.iter().all(|c| !c.is_empty()) {
        state.sub_status[br][bc] = SubStatus::Drawn;
    }
    debug_assert!(
        !lines::completes_line_through(&sub, local_idx, player.opponent(), Cell::owner),
        "a single placement cannot complete an opponent line"
    );

    state.winner = super_board_outcome(state, br * SUB_SIZE + bc, player);

    let (tr, tc) = mv.target();
    state.active_board = if state.winner.is_decided() || !state.is_playable(tr, tc) {
        ActiveBoard::Any
    } else {
        ActiveBoard::Board {
            row: tr as u8,
            col: tc as u8,
        }
    };

    state.turn = player.opponent();
    Ok(())
}

/// Outcome after `player` moved inside sub-board `board_idx`.
///
/// Only a sub-board the mover just won can complete a super-board line, and
/// only lines through it need checking.
fn super_board_outcome(state: &BoardState, board_idx: usize, player: Player) -> Winner {
    let statuses = state.sub_status_flat();
    if statuses[board_idx] == player.won_status()
        && lines::completes_line_through(&statuses, board_idx, player, SubStatus::owner)
    {
        return Winner::from_player(player);
    }
    if statuses.iter().all(|s| s.is_decided()) {
        return Winner::Draw;
    }
    Winner::None
}

/// Whether the game is over.
pub fn is_terminal(state: &BoardState) -> bool {
    state.winner.is_decided()
}

/// Current outcome of the game.
pub fn winner(state: &BoardState) -> Winner {
    state.winner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_81_moves() {
        let state = BoardState::new();
        let moves = legal_moves(&state);
        assert_eq!(moves.len(), 81);
        assert_eq!(moves[0], Move { row: 0, col: 0 });
        assert_eq!(moves[80], Move { row: 8, col: 8 });
    }

    #[test]
    fn test_out_of_range_is_invalid_coordinate() {
        let mut state = BoardState::new();
        assert_eq!(
            apply_move(&mut state, 9, 0, Player::X),
            Err(EngineError::InvalidCoordinate { row: 9, col: 0 })
        );
        assert_eq!(
            apply_move(&mut state, 0, 12, Player::X),
            Err(EngineError::InvalidCoordinate { row: 0, col: 12 })
        );
        assert_eq!(state, BoardState::new());
    }

    #[test]
    fn test_wrong_turn_rejected() {
        let mut state = BoardState::new();
        let err = apply_move(&mut state, 4, 4, Player::O).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IllegalMove {
                reason: IllegalMoveReason::WrongTurn { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_occupied_rejected() {
        let mut state = BoardState::new();
        apply_move(&mut state, 4, 4, Player::X).unwrap();
        // O is sent to the center board, where (4, 4) is already taken.
        let err = apply_move(&mut state, 4, 4, Player::O).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalMove {
                row: 4,
                col: 4,
                reason: IllegalMoveReason::Occupied
            }
        );
    }

    #[test]
    fn test_outside_active_board_rejected() {
        let mut state = BoardState::new();
        apply_move(&mut state, 0, 0, Player::X).unwrap();
        let err = apply_move(&mut state, 4, 4, Player::O).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IllegalMove {
                reason: IllegalMoveReason::OutsideActiveBoard,
                ..
            }
        ));
        assert!(!is_legal(&state, 4, 4));
        assert!(is_legal(&state, 1, 1));
    }

    #[test]
    fn test_failed_move_leaves_state_untouched() {
        let mut state = BoardState::new();
        apply_move(&mut state, 0, 0, Player::X).unwrap();
        let before = state.clone();
        assert!(apply_move(&mut state, 8, 8, Player::O).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_legal_moves_restricted_to_active_board() {
        let mut state = BoardState::new();
        apply_move(&mut state, 2, 7, Player::X).unwrap();
        // Local position (2, 1) sends O to sub-board (2, 1).
        assert_eq!(state.active_board(), ActiveBoard::Board { row: 2, col: 1 });
        let moves = legal_moves(&state);
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|m| m.board() == (2, 1)));
    }

    #[test]
    fn test_sending_to_own_board_excludes_played_cell() {
        let mut state = BoardState::new();
        apply_move(&mut state, 4, 4, Player::X).unwrap();
        assert_eq!(state.active_board(), ActiveBoard::Board { row: 1, col: 1 });
        let moves = legal_moves(&state);
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Move { row: 4, col: 4 }));
    }
}
