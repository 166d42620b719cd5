//! Response types for the web API.
//!
//! Numeric encodings follow what the browser UI expects: X is `1`, O is `-1`.

use engine_core::{legal_moves, ActiveBoard, BoardState, Cell, Move, Player, SubStatus, Winner};
use serde::{Deserialize, Serialize};
use strategies::Difficulty;

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Full game state for one session.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameStateResponse {
    /// 9x9 cells: 1=X, -1=O, 0=empty
    pub board: Vec<Vec<i8>>,
    /// 3x3 sub-boards: 0=open, 1=won by X, 2=won by O or drawn
    pub small_status: Vec<Vec<u8>>,
    /// Sub-board the next move must go to, or null for any
    pub current_board: Option<[usize; 2]>,
    /// Legal moves as [row, col]
    pub legal_moves: Vec<[usize; 2]>,
    /// 1=X won, -1=O won, 0=draw, null while in progress
    pub winner: Option<i8>,
    /// 1=X, -1=O
    pub current_player: i8,
    pub game_over: bool,
    pub difficulty: Difficulty,
    /// Side the human plays: 1=X, -1=O
    pub human_player: i8,
}

/// A move as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveJson {
    pub row: usize,
    pub col: usize,
}

impl From<Move> for MoveJson {
    fn from(mv: Move) -> Self {
        Self {
            row: mv.row(),
            col: mv.col(),
        }
    }
}

/// Response after the AI moved.
#[derive(Debug, Serialize, Deserialize)]
pub struct AiMoveResponse {
    #[serde(flatten)]
    pub state: GameStateResponse,
    #[serde(rename = "move")]
    pub mv: MoveJson,
    pub think_time_ms: u64,
}

pub fn player_code(player: Player) -> i8 {
    match player {
        Player::X => 1,
        Player::O => -1,
    }
}

fn cell_code(cell: Cell) -> i8 {
    cell.owner().map_or(0, player_code)
}

// Drawn and O-won boards share a code in the UI.
fn small_status_code(status: SubStatus) -> u8 {
    match status {
        SubStatus::Undecided => 0,
        SubStatus::WonByX => 1,
        SubStatus::WonByO | SubStatus::Drawn => 2,
    }
}

fn winner_code(winner: Winner) -> Option<i8> {
    match winner {
        Winner::None => None,
        Winner::X => Some(1),
        Winner::O => Some(-1),
        Winner::Draw => Some(0),
    }
}

impl GameStateResponse {
    pub fn from_state(state: &BoardState, difficulty: Difficulty, human: Player) -> Self {
        let board = state
            .cells()
            .iter()
            .map(|row| row.iter().map(|&c| cell_code(c)).collect())
            .collect();
        let small_status = state
            .sub_statuses()
            .iter()
            .map(|row| row.iter().map(|&s| small_status_code(s)).collect())
            .collect();
        let current_board = match state.active_board() {
            ActiveBoard::Board { row, col } if !state.is_terminal() => {
                Some([row as usize, col as usize])
            }
            _ => None,
        };

        Self {
            board,
            small_status,
            current_board,
            legal_moves: legal_moves(state)
                .into_iter()
                .map(|m| [m.row(), m.col()])
                .collect(),
            winner: winner_code(state.winner()),
            current_player: player_code(state.turn()),
            game_over: state.is_terminal(),
            difficulty,
            human_player: player_code(human),
        }
    }
}
