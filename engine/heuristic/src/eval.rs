//! Static evaluation of Ultimate Tic-Tac-Toe positions.
//!
//! Scores are integers from the point of view of a given player: positive is
//! good for that player.

use engine_core::lines::count_threats;
use engine_core::{ActiveBoard, BoardState, Cell, Player, SubStatus, Winner};

/// Score of a won game, before the ply adjustment.
pub const WIN_SCORE: i32 = 1_000_000;

/// Scores at or beyond this magnitude are forced wins or losses.
pub const WIN_THRESHOLD: i32 = WIN_SCORE - 1_000;

/// Value of a won sub-board, multiplied by its square weight.
pub const MATERIAL: i32 = 200;

/// Value of an own mark inside an undecided sub-board, multiplied by both the
/// cell weight and the board weight.
pub const POSITIONAL: i32 = 2;

/// Two-in-a-row with an empty third cell inside an undecided sub-board,
/// multiplied by the board weight.
pub const SUB_THREAT: i32 = 30;

/// Two won sub-boards with the third still undecided.
pub const SUPER_THREAT: i32 = 800;

/// Side to move may play anywhere.
pub const FORCED_ANY: i32 = 150;

/// Per threat held on the board the side to move is sent to.
pub const FORCED_THREAT: i32 = 120;

/// Square weight on a 3x3 grid: center 5, edge 3, corner 2.
#[inline]
pub fn square_weight(row: usize, col: usize) -> i32 {
    match (row, col) {
        (1, 1) => 5,
        (r, c) if (r + c) % 2 == 1 => 3,
        _ => 2,
    }
}

#[inline]
fn index_weight(idx: usize) -> i32 {
    square_weight(idx / 3, idx % 3)
}

/// Score of a finished game for `player`, `ply` moves after the search root.
/// Faster wins and slower losses score better.
pub fn terminal_score(winner: Winner, player: Player, ply: u32) -> i32 {
    let win = WIN_SCORE - ply as i32;
    match winner {
        Winner::Draw | Winner::None => 0,
        w if w == Winner::from_player(player) => win,
        _ => -win,
    }
}

/// Threats `player` holds inside sub-board `(br, bc)`.
pub fn sub_board_threats(state: &BoardState, br: usize, bc: usize, player: Player) -> u32 {
    count_threats(&state.sub_cells(br, bc), player, Cell::owner, Cell::is_empty)
}

/// Evaluate `state` for `player`.
pub fn evaluate(state: &BoardState, player: Player) -> i32 {
    if state.is_terminal() {
        return terminal_score(state.winner(), player, 0);
    }

    let opponent = player.opponent();
    let mut score = 0;

    for br in 0..3 {
        for bc in 0..3 {
            let weight = square_weight(br, bc);
            match state.sub_status(br, bc) {
                SubStatus::Undecided => {
                    score += positional(state, br, bc, player) * weight;
                    let mine = sub_board_threats(state, br, bc, player) as i32;
                    let theirs = sub_board_threats(state, br, bc, opponent) as i32;
                    score += (mine - theirs) * SUB_THREAT * weight;
                }
                status => match status.owner() {
                    Some(owner) if owner == player => score += MATERIAL * weight,
                    Some(_) => score -= MATERIAL * weight,
                    None => {}
                },
            }
        }
    }

    let statuses = state.sub_status_flat();
    let open = |s: SubStatus| s == SubStatus::Undecided;
    let mine = count_threats(&statuses, player, SubStatus::owner, open) as i32;
    let theirs = count_threats(&statuses, opponent, SubStatus::owner, open) as i32;
    score += (mine - theirs) * SUPER_THREAT;

    let forced = forced_move_term(state);
    if state.turn() == player {
        score + forced
    } else {
        score - forced
    }
}

/// Net cell weight of own marks minus opponent marks in a sub-board.
fn positional(state: &BoardState, br: usize, bc: usize, player: Player) -> i32 {
    state
        .sub_cells(br, bc)
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell.owner() {
            Some(p) if p == player => index_weight(idx) * POSITIONAL,
            Some(_) => -index_weight(idx) * POSITIONAL,
            None => 0,
        })
        .sum()
}

/// Where the side to move has been sent, from its own point of view.
fn forced_move_term(state: &BoardState) -> i32 {
    let side = state.turn();
    match state.active_board() {
        ActiveBoard::Any => FORCED_ANY,
        ActiveBoard::Board { row, col } => {
            let (br, bc) = (row as usize, col as usize);
            let mine = sub_board_threats(state, br, bc, side) as i32;
            let theirs = sub_board_threats(state, br, bc, side.opponent()) as i32;
            (mine - theirs) * FORCED_THREAT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Move;

    fn play(state: &mut BoardState, row: u8, col: u8) {
        state.play(Move { row, col }).unwrap();
    }

    #[test]
    fn test_square_weights() {
        assert_eq!(square_weight(1, 1), 5);
        assert_eq!(square_weight(0, 1), 3);
        assert_eq!(square_weight(1, 2), 3);
        assert_eq!(square_weight(0, 0), 2);
        assert_eq!(square_weight(2, 2), 2);
    }

    #[test]
    fn test_empty_board_is_symmetric() {
        let state = BoardState::new();
        // Only the forced-move term differs: X to move and sent anywhere.
        assert_eq!(evaluate(&state, Player::X), FORCED_ANY);
        assert_eq!(evaluate(&state, Player::O), -FORCED_ANY);
    }

    #[test]
    fn test_evaluation_is_zero_sum() {
        let mut state = BoardState::new();
        for (r, c) in [(4, 4), (3, 3), (0, 0), (1, 1), (4, 3)] {
            play(&mut state, r, c);
        }
        assert_eq!(evaluate(&state, Player::X), -evaluate(&state, Player::O));
    }

    #[test]
    fn test_center_mark_beats_corner_mark() {
        let mut center = BoardState::new();
        play(&mut center, 4, 4);
        let mut corner = BoardState::new();
        play(&mut corner, 0, 0);
        assert!(evaluate(&center, Player::X) > evaluate(&corner, Player::X));
    }

    #[test]
    fn test_won_sub_board_counts_material() {
        let state: BoardState = "
            X X X | . . . | . . .
            O O . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | O . . | . . .
        "
        .parse()
        .unwrap();
        assert_eq!(state.sub_status(0, 0), SubStatus::WonByX);
        assert!(evaluate(&state, Player::X) > MATERIAL * square_weight(0, 0) / 2);
        assert!(evaluate(&state, Player::O) < 0);
    }

    #[test]
    fn test_terminal_scores_prefer_fast_wins() {
        assert_eq!(terminal_score(Winner::X, Player::X, 0), WIN_SCORE);
        assert_eq!(terminal_score(Winner::X, Player::X, 3), WIN_SCORE - 3);
        assert_eq!(terminal_score(Winner::X, Player::O, 3), -(WIN_SCORE - 3));
        assert_eq!(terminal_score(Winner::Draw, Player::O, 5), 0);
        assert!(terminal_score(Winner::O, Player::O, 2) > terminal_score(Winner::O, Player::O, 4));
    }

    #[test]
    fn test_sub_board_threats() {
        let state: BoardState = "
            X . . | . . . | . . .
            . X . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . . .
            . . . | . . . | . . .
            ------+-------+------
            . . . | . . . | . . .
            . . . | . . . | . O .
            . . . | . . . | . . O
        "
        .parse()
        .unwrap();
        // Diagonal of board (0,0) with its corner still open.
        assert_eq!(sub_board_threats(&state, 0, 0, Player::X), 1);
        assert_eq!(sub_board_threats(&state, 0, 0, Player::O), 0);
        assert_eq!(sub_board_threats(&state, 2, 2, Player::O), 1);
    }
}
