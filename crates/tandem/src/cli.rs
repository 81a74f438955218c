//! Command-line interface for tandem.

use crate::config::MatchConfig;
use clap::Parser;
use std::path::PathBuf;
use tandem_tictactoe::{PolicyKind, WaitMode};
use tracing::{debug, instrument};

/// Tandem - two threads take turns on one tic-tac-toe board
#[derive(Parser, Debug)]
#[command(name = "tandem")]
#[command(about = "Concurrent tic-tac-toe between two independently scheduled players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the match configuration file (defaults apply if missing)
    #[arg(short, long, default_value = "tandem.toml")]
    pub config: PathBuf,

    /// Strategy for player X
    #[arg(long)]
    pub x_policy: Option<PolicyKind>,

    /// Strategy for player O
    #[arg(long)]
    pub o_policy: Option<PolicyKind>,

    /// Seed for the random strategy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between turn checks
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Milliseconds to pause after each accepted move
    #[arg(long)]
    pub move_delay_ms: Option<u64>,

    /// How a player waits for its turn: poll or block
    #[arg(long)]
    pub wait_mode: Option<WaitMode>,
}

impl Cli {
    /// Layers command-line flags over values from the config file.
    #[instrument(skip_all)]
    pub fn apply(&self, mut config: MatchConfig) -> MatchConfig {
        if let Some(policy) = self.x_policy {
            config.x_policy = policy;
        }
        if let Some(policy) = self.o_policy {
            config.o_policy = policy;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(ms) = self.poll_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(ms) = self.move_delay_ms {
            config.move_delay_ms = ms;
        }
        if let Some(mode) = self.wait_mode {
            config.wait_mode = mode;
        }
        debug!(?config, "Effective match configuration");
        config
    }
}
