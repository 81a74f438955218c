//! Move rejection reasons.
//!
//! A rejected move is an ordinary outcome for an actor: it picks another
//! candidate and tries again. Nothing here is fatal.

use crate::{Player, Position};

/// Why the shared game state refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(#[error(not(source))] Player),

    /// Coordinates fall outside the 3x3 grid.
    #[display("Position ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: isize,
        /// Requested column.
        col: isize,
    },

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),
}

impl MoveError {
    /// True when retrying in the same turn window cannot succeed.
    pub fn ends_turn_window(self) -> bool {
        matches!(self, MoveError::GameOver | MoveError::WrongTurn(_))
    }
}
