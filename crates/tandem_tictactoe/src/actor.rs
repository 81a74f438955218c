//! Actors: independently scheduled players sharing one game state.

use crate::policy::MovePolicy;
use crate::{GameState, Player, Position};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How an actor spends the time while it is not its turn.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WaitMode {
    /// Sleep for the poll interval, then re-check.
    #[default]
    Poll,
    /// Wait on the state's condition variable, bounded by the poll interval.
    Block,
}

/// Timing of an actor's loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct Pacing {
    /// Pause between checks while waiting for a turn.
    poll_interval: Duration,
    /// Pause after an accepted move.
    move_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_millis(500))
    }
}

/// Summary of one actor's run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct ActorReport {
    /// Moves the game state accepted.
    moves: usize,
    /// Candidates the game state rejected.
    rejections: usize,
}

/// A player running its own loop against a borrowed [`GameState`].
#[derive(Debug)]
pub struct Actor<'g> {
    game: &'g GameState,
    player: Player,
    policy: Box<dyn MovePolicy>,
    pacing: Pacing,
    wait_mode: WaitMode,
    halt: Option<&'g AtomicBool>,
}

impl<'g> Actor<'g> {
    /// Creates an actor with default pacing and polling.
    pub fn new(game: &'g GameState, player: Player, policy: Box<dyn MovePolicy>) -> Self {
        Self {
            game,
            player,
            policy,
            pacing: Pacing::default(),
            wait_mode: WaitMode::default(),
            halt: None,
        }
    }

    /// Sets the loop timing.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets how the actor waits for its turn.
    pub fn with_wait_mode(mut self, wait_mode: WaitMode) -> Self {
        self.wait_mode = wait_mode;
        self
    }

    /// Stops the loop early once `halt` is set, e.g. when the other
    /// player's thread has died and the game can no longer finish.
    pub fn with_halt(mut self, halt: &'g AtomicBool) -> Self {
        self.halt = Some(halt);
        self
    }

    fn halted(&self) -> bool {
        self.halt.is_some_and(|halt| halt.load(Ordering::Acquire))
    }

    /// Plays until the game state reports a terminal status.
    ///
    /// The lock is only held inside individual game-state calls, never
    /// across a sleep or a wait.
    #[instrument(skip(self), fields(player = %self.player, policy = %self.policy.kind()))]
    pub fn run(mut self) -> ActorReport {
        let mut report = ActorReport::default();
        info!("Actor started");

        while !self.game.is_over() {
            if self.halted() {
                warn!("Actor halted before the game ended");
                break;
            }
            if self.game.is_turn_of(self.player) && self.take_turn(&mut report) {
                std::thread::sleep(self.pacing.move_delay);
            } else {
                self.idle();
            }
        }

        info!(moves = report.moves, rejections = report.rejections, "Actor finished");
        report
    }

    /// Runs one turn window. Returns true if a move was accepted.
    fn take_turn(&mut self, report: &mut ActorReport) -> bool {
        let mut tried: Vec<Position> = Vec::new();
        loop {
            // Only the turn holder can change the board, so this copy stays
            // accurate for the whole window.
            let board = self.game.board();
            let Some(candidate) = self.policy.propose(&board, &tried) else {
                warn!(tried = tried.len(), "Policy ran out of candidates");
                return false;
            };

            match self.game.place(self.player, candidate) {
                Ok(_) => {
                    report.moves += 1;
                    return true;
                }
                Err(error) => {
                    report.rejections += 1;
                    debug!(%candidate, %error, "Candidate rejected");
                    if error.ends_turn_window() {
                        return false;
                    }
                    tried.push(candidate);
                }
            }
        }
    }

    fn idle(&self) {
        match self.wait_mode {
            WaitMode::Poll => std::thread::sleep(self.pacing.poll_interval),
            WaitMode::Block => {
                let outcome = self
                    .game
                    .wait_for_turn(self.player, self.pacing.poll_interval);
                debug!(?outcome, "Woke from turn wait");
            }
        }
    }
}
