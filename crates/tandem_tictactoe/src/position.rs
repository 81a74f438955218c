//! Board coordinates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A validated cell on the board, `row` and `col` both in `0..3`.
///
/// Callers outside the crate hand in signed coordinates; anything that does
/// not name one of the nine cells never becomes a `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::at(0, 0),
        Position::at(0, 1),
        Position::at(0, 2),
        Position::at(1, 0),
        Position::at(1, 1),
        Position::at(1, 2),
        Position::at(2, 0),
        Position::at(2, 1),
        Position::at(2, 2),
    ];

    /// The center cell.
    pub const CENTER: Position = Position::at(1, 1);

    const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Creates a position from signed coordinates, `None` when off the board.
    #[instrument]
    pub fn from_coords(row: isize, col: isize) -> Option<Self> {
        if (0..3).contains(&row) && (0..3).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Creates position from a row-major board index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row, 0-2.
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column, 0-2.
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Converts position to row-major board index (0-8).
    pub fn index(self) -> usize {
        self.row() * 3 + self.col()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
