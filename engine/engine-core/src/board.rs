//! Board state types.
//!
//! The full grid is 9x9, row-major, indices 0..9. It is partitioned into nine
//! 3x3 sub-boards; sub-board `(br, bc)` covers rows `3*br..3*br+3` and columns
//! `3*bc..3*bc+3`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::lines;
use crate::{GRID_SIZE, SUB_SIZE};

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// One of the two players. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark this player places.
    pub fn mark(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// The sub-board status produced when this player completes a line.
    pub fn won_status(self) -> SubStatus {
        match self {
            Player::X => SubStatus::WonByX,
            Player::O => SubStatus::WonByO,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A cell coordinate on the 9x9 grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    /// Create a move, validating that both coordinates lie in 0..9.
    pub fn new(row: usize, col: usize) -> Result<Self, EngineError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(EngineError::InvalidCoordinate { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Sub-board `(br, bc)` containing this cell.
    pub fn board(self) -> (usize, usize) {
        (self.row() / SUB_SIZE, self.col() / SUB_SIZE)
    }

    /// Position of this cell inside its sub-board, as `(r, c)` in 0..3.
    pub fn local(self) -> (usize, usize) {
        (self.row() % SUB_SIZE, self.col() % SUB_SIZE)
    }

    /// Sub-board the opponent is sent to after this move.
    pub fn target(self) -> (usize, usize) {
        self.local()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of a single sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubStatus {
    #[default]
    Undecided,
    WonByX,
    WonByO,
    Drawn,
}

impl SubStatus {
    pub fn is_decided(self) -> bool {
        self != SubStatus::Undecided
    }

    /// The player who won this sub-board. Drawn boards belong to nobody.
    pub fn owner(self) -> Option<Player> {
        match self {
            SubStatus::WonByX => Some(Player::X),
            SubStatus::WonByO => Some(Player::O),
            SubStatus::Undecided | SubStatus::Drawn => None,
        }
    }
}

/// The sub-board the player on turn must play in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveBoard {
    /// Any undecided sub-board may be played.
    Any,
    /// Only the sub-board at `(row, col)` (each 0..3) may be played.
    Board { row: u8, col: u8 },
}

/// Game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Winner {
    #[default]
    None,
    X,
    O,
    Draw,
}

impl Winner {
    pub fn is_decided(self) -> bool {
        self != Winner::None
    }

    pub fn from_player(player: Player) -> Self {
        match player {
            Player::X => Winner::X,
            Player::O => Winner::O,
        }
    }

    /// Reward for `player`: +1 win, -1 loss, 0 draw or undecided.
    pub fn reward_for(self, player: Player) -> f64 {
        match (self, player) {
            (Winner::X, Player::X) | (Winner::O, Player::O) => 1.0,
            (Winner::X, Player::O) | (Winner::O, Player::X) => -1.0,
            (Winner::Draw, _) | (Winner::None, _) => 0.0,
        }
    }
}

/// Complete game state.
///
/// Fields are private; the only mutation path is [`crate::apply_move`], which
/// keeps the cell grid, sub-board statuses, active board and winner
/// consistent with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub(crate) cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    pub(crate) sub_status: [[SubStatus; SUB_SIZE]; SUB_SIZE],
    pub(crate) active_board: ActiveBoard,
    pub(crate) turn: Player,
    pub(crate) winner: Winner,
}

impl BoardState {
    /// Fresh game: all cells empty, any board playable, X to move.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; GRID_SIZE]; GRID_SIZE],
            sub_status: [[SubStatus::Undecided; SUB_SIZE]; SUB_SIZE],
            active_board: ActiveBoard::Any,
            turn: Player::X,
            winner: Winner::None,
        }
    }

    /// Rebuild a state from a raw cell grid.
    ///
    /// Sub-board statuses and the winner are derived from `cells`. An
    /// `active_board` that points at a decided or full sub-board is
    /// normalised to [`ActiveBoard::Any`].
    ///
    /// Fails with [`EngineError::InvalidPosition`] when a sub-board or the
    /// super-board holds completed lines for both players, which cannot
    /// arise from play.
    pub fn from_position(
        cells: [[Cell; GRID_SIZE]; GRID_SIZE],
        turn: Player,
        active_board: ActiveBoard,
    ) -> Result<Self, EngineError> {
        let mut state = Self {
            cells,
            turn,
            ..Self::new()
        };

        for br in 0..SUB_SIZE {
            for bc in 0..SUB_SIZE {
                let sub = state.sub_cells(br, bc);
                let x_line = lines::completed_line(&sub, |c| (c == Cell::X).then_some(Player::X));
                let o_line = lines::completed_line(&sub, |c| (c == Cell::O).then_some(Player::O));
                state.sub_status[br][bc] = match (x_line, o_line) {
                    (Some(_), Some(_)) => {
                        return Err(EngineError::InvalidPosition(format!(
                            "sub-board ({}, {}) has lines for both players",
                            br, bc
                        )))
                    }
                    (Some(_), None) => SubStatus::WonByX,
                    (None, Some(_)) => SubStatus::WonByO,
                    (None, None) if sub.iter().all(|c| !c.is_empty()) => SubStatus::Drawn,
                    (None, None) => SubStatus::Undecided,
                };
            }
        }

        let statuses = state.sub_status_flat();
        let x_line = lines::completed_line(&statuses, |s| {
            (s == SubStatus::WonByX).then_some(Player::X)
        });
        let o_line = lines::completed_line(&statuses, |s| {
            (s == SubStatus::WonByO).then_some(Player::O)
        });
        state.winner = match (x_line, o_line) {
            (Some(_), Some(_)) => {
                return Err(EngineError::InvalidPosition(
                    "super-board has lines for both players".to_string(),
                ))
            }
            (Some(_), None) => Winner::X,
            (None, Some(_)) => Winner::O,
            (None, None) if statuses.iter().all(|s| s.is_decided()) => Winner::Draw,
            (None, None) => Winner::None,
        };

        state.active_board = match active_board {
            ActiveBoard::Board { row, col } if state.is_playable(row as usize, col as usize) => {
                active_board
            }
            _ => ActiveBoard::Any,
        };

        Ok(state)
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn cells(&self) -> &[[Cell; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn sub_status(&self, br: usize, bc: usize) -> SubStatus {
        self.sub_status[br][bc]
    }

    pub fn sub_statuses(&self) -> &[[SubStatus; SUB_SIZE]; SUB_SIZE] {
        &self.sub_status
    }

    /// Sub-board statuses flattened row-major, for line checks.
    pub fn sub_status_flat(&self) -> [SubStatus; 9] {
        let mut flat = [SubStatus::Undecided; 9];
        for (i, slot) in flat.iter_mut().enumerate() {
            *slot = self.sub_status[i / SUB_SIZE][i % SUB_SIZE];
        }
        flat
    }

    /// The nine cells of sub-board `(br, bc)`, row-major.
    pub fn sub_cells(&self, br: usize, bc: usize) -> [Cell; 9] {
        let mut sub = [Cell::Empty; 9];
        for (i, slot) in sub.iter_mut().enumerate() {
            *slot = self.cells[br * SUB_SIZE + i / SUB_SIZE][bc * SUB_SIZE + i % SUB_SIZE];
        }
        sub
    }

    pub fn active_board(&self) -> ActiveBoard {
        self.active_board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_decided()
    }

    /// Number of marks on the grid.
    pub fn move_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| !c.is_empty())
            .count()
    }

    /// Whether sub-board `(br, bc)` is undecided and has an empty cell.
    pub fn is_playable(&self, br: usize, bc: usize) -> bool {
        br < SUB_SIZE
            && bc < SUB_SIZE
            && self.sub_status[br][bc] == SubStatus::Undecided
            && self.sub_cells(br, bc).iter().any(|c| c.is_empty())
    }

    /// Apply `mv` for the player on turn.
    pub fn play(&mut self, mv: Move) -> Result<(), EngineError> {
        let player = self.turn;
        crate::rules::apply_move(self, mv.row(), mv.col(), player)
    }

    /// The state after the player on turn plays `mv`. `self` is unchanged.
    pub fn after(&self, mv: Move) -> Result<BoardState, EngineError> {
        let mut next = self.clone();
        next.play(mv)?;
        Ok(next)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            if row > 0 && row % SUB_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..GRID_SIZE {
                if col > 0 && col % SUB_SIZE == 0 {
                    write!(f, "| ")?;
                }
                let ch = match self.cells[row][col] {
                    Cell::Empty => '.',
                    Cell::X => 'X',
                    Cell::O => 'O',
                };
                write!(f, "{}", ch)?;
                if col + 1 < GRID_SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for BoardState {
    type Err = EngineError;

    /// Parse the diagram produced by `Display`.
    ///
    /// Only `X`, `O` and `.` are significant; separators and whitespace are
    /// ignored. The turn is inferred from the mark counts and the active
    /// board is `Any`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let marks: Vec<Cell> = s
            .chars()
            .filter_map(|ch| match ch {
                '.' => Some(Cell::Empty),
                'X' | 'x' => Some(Cell::X),
                'O' | 'o' => Some(Cell::O),
                _ => None,
            })
            .collect();

        if marks.len() != GRID_SIZE * GRID_SIZE {
            return Err(EngineError::InvalidPosition(format!(
                "expected 81 cells, found {}",
                marks.len()
            )));
        }

        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for (i, cell) in marks.into_iter().enumerate() {
            cells[i / GRID_SIZE][i % GRID_SIZE] = cell;
        }

        let xs = cells.iter().flatten().filter(|&&c| c == Cell::X).count();
        let os = cells.iter().flatten().filter(|&&c| c == Cell::O).count();
        let turn = match xs.checked_sub(os) {
            Some(0) => Player::X,
            Some(1) => Player::O,
            _ => {
                return Err(EngineError::InvalidPosition(format!(
                    "mark counts X={} O={} cannot arise from play",
                    xs, os
                )))
            }
        };

        Self::from_position(cells, turn, ActiveBoard::Any)
    }
}
