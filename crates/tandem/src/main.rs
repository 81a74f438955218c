//! Tandem - two players, two threads, one board.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tandem::{Cli, MatchConfig, run_match};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,tandem=info,tandem_tictactoe=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.apply(MatchConfig::load_or_default(&cli.config)?);
    info!(?config, "Starting match");

    let stdout = std::io::stdout();
    let summary = run_match(&config, &mut stdout.lock())?;
    info!(moves = summary.moves(), status = %summary.status(), "Done");

    Ok(())
}
