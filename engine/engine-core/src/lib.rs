//! Core board state and rules for Ultimate Tic-Tac-Toe
//!
//! This crate owns the game model that every other component builds on:
//! - `BoardState`: the 9x9 cell grid, 3x3 sub-board status grid, active-board
//!   pointer, turn indicator and winner
//! - `rules`: legal-move enumeration, move application and terminal detection
//! - `EngineError`: the error kinds surfaced to callers
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{apply_move, legal_moves, ActiveBoard, BoardState, Player};
//!
//! let mut state = BoardState::new();
//! assert_eq!(legal_moves(&state).len(), 81);
//!
//! apply_move(&mut state, 0, 0, Player::X).unwrap();
//! assert_eq!(state.active_board(), ActiveBoard::Board { row: 0, col: 0 });
//! assert_eq!(state.turn(), Player::O);
//! ```
//!
//! # Architecture
//!
//! All mutation flows through [`apply_move`]. `BoardState` fields are private;
//! search code explores positions on clones via [`BoardState::after`] or
//! [`BoardState::play`], both of which delegate to `apply_move`.

pub mod board;
pub mod error;
pub mod lines;
pub mod rules;

pub use board::{ActiveBoard, BoardState, Cell, Move, Player, SubStatus, Winner};
pub use error::{EngineError, IllegalMoveReason};
pub use rules::{apply_move, is_legal, is_terminal, legal_moves, winner};

/// Side length of the full grid.
pub const GRID_SIZE: usize = 9;

/// Side length of a sub-board and of the super-board.
pub const SUB_SIZE: usize = 3;
