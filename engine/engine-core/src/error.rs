//! Error kinds returned by the rules engine and the move-selection strategies.

use std::fmt;
use thiserror::Error;

use crate::board::Player;

/// Errors surfaced by engine operations.
///
/// All variants are local, synchronous failures. Retrying the same call with
/// the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        row: usize,
        col: usize,
        reason: IllegalMoveReason,
    },

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid coordinate ({row}, {col}): row and col must be in 0..9")]
    InvalidCoordinate { row: usize, col: usize },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// The game already has a winner or is drawn.
    GameOver,
    /// The move was submitted for the player who is not on turn.
    WrongTurn { expected: Player, found: Player },
    /// The target cell already holds a mark.
    Occupied,
    /// The target cell lies outside the sub-board the mover was sent to.
    OutsideActiveBoard,
    /// The target sub-board is already won or drawn.
    SubBoardDecided,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveReason::GameOver => write!(f, "game is already over"),
            IllegalMoveReason::WrongTurn { expected, found } => {
                write!(f, "it is {}'s turn, not {}'s", expected, found)
            }
            IllegalMoveReason::Occupied => write!(f, "cell is occupied"),
            IllegalMoveReason::OutsideActiveBoard => {
                write!(f, "cell is outside the active sub-board")
            }
            IllegalMoveReason::SubBoardDecided => write!(f, "sub-board is already decided"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::IllegalMove {
            row: 3,
            col: 4,
            reason: IllegalMoveReason::Occupied,
        };
        assert_eq!(err.to_string(), "Illegal move at (3, 4): cell is occupied");

        let err = EngineError::InvalidCoordinate { row: 9, col: 0 };
        assert!(err.to_string().contains("(9, 0)"));

        assert_eq!(
            EngineError::NoLegalMoves.to_string(),
            "No legal moves available"
        );
    }

    #[test]
    fn test_wrong_turn_message_names_both_players() {
        let reason = IllegalMoveReason::WrongTurn {
            expected: Player::X,
            found: Player::O,
        };
        assert_eq!(reason.to_string(), "it is X's turn, not O's");
    }
}
