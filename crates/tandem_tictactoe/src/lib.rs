//! Tic-tac-toe played by two threads through one shared game state.
//!
//! # Architecture
//!
//! - **GameState**: the board, the turn marker and the status behind a
//!   single mutex, plus a condition variable notified on every move
//! - **Actor**: a player loop that polls (or waits) for its turn and
//!   submits candidates from a [`MovePolicy`]
//! - **Rules**: pure win/draw checks over a [`Board`]
//!
//! # Example
//!
//! ```
//! use tandem_tictactoe::{Actor, GameState, Pacing, Player, PolicyKind};
//! use std::time::Duration;
//!
//! let game = GameState::new();
//! let pacing = Pacing::new(Duration::from_millis(1), Duration::ZERO);
//! std::thread::scope(|s| {
//!     for (player, kind) in [(Player::X, PolicyKind::Sequential), (Player::O, PolicyKind::Random)] {
//!         let actor = Actor::new(&game, player, kind.build(Some(3))).with_pacing(pacing);
//!         s.spawn(move || actor.run());
//!     }
//! });
//! assert!(game.is_over());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod actor;
mod events;
mod policy;
mod position;
pub mod rules;
mod state;
mod types;

pub use action::MoveError;
pub use actor::{Actor, ActorReport, Pacing, WaitMode};
pub use events::GameEvent;
pub use policy::{MovePolicy, PolicyKind, RandomProbe, Sequential};
pub use position::Position;
pub use state::{GameState, Snapshot, TurnWait};
pub use types::{Board, GameStatus, Player, Square};
