//! Tandem - concurrent tic-tac-toe
//!
//! Wires the shared game state from `tandem_tictactoe` to a command line:
//!
//! - **Config**: TOML match settings with CLI overrides
//! - **Runner**: spawns both players on scoped threads and renders moves
//!   from the game's event stream

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod runner;

pub use cli::Cli;
pub use config::{ConfigError, MatchConfig};
pub use runner::{MatchSummary, run_match, run_match_with};
