//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};
use tracing::instrument;

const fn cell(row: u8, col: u8) -> usize {
    (row * 3 + col) as usize
}

/// The eight winning lines as row-major indices: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [cell(0, 0), cell(0, 1), cell(0, 2)],
    [cell(1, 0), cell(1, 1), cell(1, 2)],
    [cell(2, 0), cell(2, 1), cell(2, 2)],
    // Columns
    [cell(0, 0), cell(1, 0), cell(2, 0)],
    [cell(0, 1), cell(1, 1), cell(2, 1)],
    [cell(0, 2), cell(1, 2), cell(2, 2)],
    // Diagonals
    [cell(0, 0), cell(1, 1), cell(2, 2)],
    [cell(0, 2), cell(1, 1), cell(2, 0)],
];

/// Returns true if `player` holds all three cells of any line.
#[instrument(skip(board))]
pub fn has_line(board: &Board, player: Player) -> bool {
    let mark = Square::Occupied(player);
    let squares = board.squares();
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| squares[i] == mark))
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|player| has_line(board, *player))
}

/// Cells of the first line `player` completes, if any.
pub fn winning_line(board: &Board, player: Player) -> Option<[Position; 3]> {
    let mark = Square::Occupied(player);
    LINES.iter().find_map(|line| {
        let cells = line.map(|i| Position::ALL[i]);
        cells.iter().all(|p| board.get(*p) == mark).then_some(cells)
    })
}
