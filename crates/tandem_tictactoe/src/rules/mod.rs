//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). The shared game state
//! calls these under its lock; they never see anything but a board.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, has_line, winning_line};
