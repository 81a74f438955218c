//! Match orchestration: one game state, two actor threads, one renderer.

use crate::config::MatchConfig;
use anyhow::{Context, Result};
use derive_getters::Getters;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tandem_tictactoe::{
    Actor, ActorReport, GameEvent, GameState, GameStatus, MovePolicy, Player,
};
use tracing::{error, info, instrument, warn};

/// How long the renderer waits for an event before checking that both
/// players are still alive.
const STALL_CHECK: Duration = Duration::from_millis(50);

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct MatchSummary {
    /// Terminal status.
    status: GameStatus,
    /// Player X's loop summary.
    x: ActorReport,
    /// Player O's loop summary.
    o: ActorReport,
}

impl MatchSummary {
    /// Total accepted moves.
    pub fn moves(&self) -> usize {
        self.x.moves() + self.o.moves()
    }

    /// The winning player, or `None` for a draw.
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }
}

/// Plays one match to completion, rendering the banner, every accepted
/// move, and the final result to `out`.
pub fn run_match<W: Write>(config: &MatchConfig, out: &mut W) -> Result<MatchSummary> {
    let x = config.x_policy().build(config.seed_for(0));
    let o = config.o_policy().build(config.seed_for(1));
    run_match_with(config, x, o, out)
}

/// Like [`run_match`], with caller-supplied policies in place of the ones
/// named in `config`. Pacing and wait mode still come from `config`.
///
/// If a player thread dies before the game ends, the other player is
/// halted and the panic is reported as an error.
#[instrument(skip_all, fields(x = %x_policy.kind(), o = %o_policy.kind()))]
pub fn run_match_with<W: Write>(
    config: &MatchConfig,
    x_policy: Box<dyn MovePolicy>,
    o_policy: Box<dyn MovePolicy>,
    out: &mut W,
) -> Result<MatchSummary> {
    writeln!(out, "Starting concurrent tic-tac-toe...")?;
    writeln!(out, "Player X: {}", x_policy.kind().label())?;
    writeln!(out, "Player O: {}", o_policy.kind().label())?;

    let (tx, rx) = mpsc::channel();
    let game = GameState::new().with_events(tx);
    let halt = AtomicBool::new(false);
    let pacing = config.pacing();
    let shared = &game;
    let halt = &halt;

    let (rendered, x, o) = thread::scope(|s| {
        let spawn = |player: Player, policy: Box<dyn MovePolicy>| {
            let actor = Actor::new(shared, player, policy)
                .with_pacing(pacing)
                .with_wait_mode(*config.wait_mode())
                .with_halt(halt);
            thread::Builder::new()
                .name(format!("player-{player}"))
                .spawn_scoped(s, move || actor.run())
        };

        let x = spawn(Player::X, x_policy).context("Failed to spawn player X")?;
        let o = spawn(Player::O, o_policy).context("Failed to spawn player O")?;

        let rendered = render(&rx, out, || x.is_finished() || o.is_finished());
        if !matches!(rendered, Ok(true)) {
            halt.store(true, Ordering::Release);
        }

        let x = x
            .join()
            .map_err(|_| anyhow::anyhow!("Player X thread panicked"))?;
        let o = o
            .join()
            .map_err(|_| anyhow::anyhow!("Player O thread panicked"))?;
        Ok::<_, anyhow::Error>((rendered, x, o))
    })?;
    if !rendered? {
        anyhow::bail!("Match stopped before the game ended");
    }

    let status = game.winner();
    writeln!(out, "\nFinal result: {}", status)?;
    info!(
        %status,
        winner = ?status.winner(),
        x_moves = x.moves(),
        o_moves = o.moves(),
        "Match finished"
    );

    Ok(MatchSummary { status, x, o })
}

/// Writes each move as it arrives until the game reports its end.
///
/// Returns `Ok(false)` when the stream stalls with a player thread gone
/// (`stalled` reports true after an idle [`STALL_CHECK`]) or when every
/// sender has been dropped, since no `GameOver` can arrive after that.
fn render<W: Write>(
    events: &mpsc::Receiver<GameEvent>,
    out: &mut W,
    stalled: impl Fn() -> bool,
) -> Result<bool> {
    loop {
        match events.recv_timeout(STALL_CHECK) {
            Ok(GameEvent::MoveMade {
                player,
                position,
                board,
                current_turn,
                ..
            }) => {
                writeln!(out, "\nPlayer {} played {}", player, position)?;
                writeln!(out, "Board:\n{}", board)?;
                writeln!(out, "Current player: {}", current_turn)?;
            }
            Ok(GameEvent::GameOver(status)) => {
                info!(%status, "Game over");
                return Ok(true);
            }
            Err(RecvTimeoutError::Timeout) => {
                if stalled() {
                    error!("A player stopped before the game ended");
                    return Ok(false);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Event stream closed before the game ended");
                return Ok(false);
            }
        }
    }
}
