//! Three-in-a-row detection shared by sub-boards and the super-board.
//!
//! Both granularities are 3x3 grids indexed 0..9 in row-major order, so a
//! single line table serves both.

use crate::board::Player;

/// Winning lines (rows, columns, diagonals) of a 3x3 grid.
pub static LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Indices into [`LINES`] for the lines passing through each grid position.
static LINES_THROUGH: [&[usize]; 9] = [
    &[0, 3, 6],
    &[0, 4],
    &[0, 5, 7],
    &[1, 3],
    &[1, 4, 6, 7],
    &[1, 5],
    &[2, 3, 7],
    &[2, 4],
    &[2, 5, 6],
];

/// Lines passing through `idx`.
pub fn lines_through(idx: usize) -> impl Iterator<Item = &'static [usize; 3]> {
    LINES_THROUGH[idx].iter().map(|&l| &LINES[l])
}

/// First completed line over `grid`, where `owner` maps an entry to the
/// player it counts for (or `None` for empty/blocking entries).
pub fn completed_line<T: Copy>(
    grid: &[T; 9],
    owner: impl Fn(T) -> Option<Player>,
) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| {
        let p = owner(grid[a])?;
        (owner(grid[b]) == Some(p) && owner(grid[c]) == Some(p)).then_some(p)
    })
}

/// Whether `player` completes a line through `idx`.
///
/// Only lines containing `idx` are examined: a line completed by a single
/// placement must pass through the placed position.
pub fn completes_line_through<T: Copy>(
    grid: &[T; 9],
    idx: usize,
    player: Player,
    owner: impl Fn(T) -> Option<Player>,
) -> bool {
    lines_through(idx).any(|line| line.iter().all(|&i| owner(grid[i]) == Some(player)))
}

/// Number of lines where `player` holds two entries and the third is open.
///
/// `is_open` decides which entries still allow the line to be completed.
pub fn count_threats<T: Copy>(
    grid: &[T; 9],
    player: Player,
    owner: impl Fn(T) -> Option<Player>,
    is_open: impl Fn(T) -> bool,
) -> u32 {
    LINES
        .iter()
        .filter(|line| {
            let mine = line.iter().filter(|&&i| owner(grid[i]) == Some(player)).count();
            let open = line.iter().filter(|&&i| is_open(grid[i])).count();
            mine == 2 && open == 1
        })
        .count() as u32
}
