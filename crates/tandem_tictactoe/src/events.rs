//! Notifications published by the shared game state.

use crate::{Board, GameStatus, Player, Position};

/// Messages sent from the game state to whoever renders the match.
///
/// Events are sent while the state lock is held, so a receiver sees them
/// in exactly the order the moves were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was accepted.
    MoveMade {
        /// Who moved.
        player: Player,
        /// Where.
        position: Position,
        /// Board after the move.
        board: Board,
        /// Whose turn it is now. Unchanged by a terminal move.
        current_turn: Player,
        /// Status after the move.
        status: GameStatus,
    },
    /// The game reached a terminal status.
    GameOver(GameStatus),
}
