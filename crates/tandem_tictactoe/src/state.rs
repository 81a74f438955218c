//! The shared game state.
//!
//! One mutex guards the board, the turn marker and the status together, so a
//! move's validate-apply-evaluate-publish sequence is atomic with respect to
//! the other actor. A condition variable is notified on every accepted move.
//! Polling actors never depend on it; it only lets blocking waiters wake
//! early.

use crate::events::GameEvent;
use crate::rules::{has_line, is_full, winning_line};
use crate::{Board, GameStatus, MoveError, Player, Position, Square};
use derive_getters::Getters;
use std::sync::mpsc::Sender;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Consistent copy of the game taken under a single lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Snapshot {
    /// The board.
    board: Board,
    /// Player to move. Frozen once the game ends.
    current_turn: Player,
    /// Game status.
    status: GameStatus,
}

/// Result of [`GameState::wait_for_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnWait {
    /// It is now the caller's turn.
    Ready,
    /// The game ended while waiting (or had already ended).
    Finished(GameStatus),
    /// The timeout elapsed first.
    TimedOut,
}

#[derive(Debug)]
struct Table {
    board: Board,
    current_turn: Player,
    status: GameStatus,
    events: Option<Sender<GameEvent>>,
}

impl Table {
    fn check_turn(&self, player: Player) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.current_turn != player {
            return Err(MoveError::WrongTurn(player));
        }
        Ok(())
    }

    fn apply(&mut self, player: Player, position: Position) -> Result<GameStatus, MoveError> {
        if !self.board.is_empty(position) {
            return Err(MoveError::Occupied(position));
        }

        self.board.set(position, Square::Occupied(player));

        // Win before draw: a last-cell move that completes a line is a win.
        if has_line(&self.board, player) {
            self.status = GameStatus::Won(player);
        } else if is_full(&self.board) {
            self.status = GameStatus::Draw;
        } else {
            self.current_turn = player.opponent();
        }

        self.publish(player, position);
        Ok(self.status)
    }

    fn publish(&self, player: Player, position: Position) {
        let Some(events) = &self.events else {
            return;
        };
        let sent = events
            .send(GameEvent::MoveMade {
                player,
                position,
                board: self.board,
                current_turn: self.current_turn,
                status: self.status,
            })
            .and_then(|()| {
                if self.status.is_terminal() {
                    events.send(GameEvent::GameOver(self.status))
                } else {
                    Ok(())
                }
            });
        if sent.is_err() {
            debug!("Event receiver dropped, continuing without notifications");
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            current_turn: self.current_turn,
            status: self.status,
        }
    }
}

/// Tic-tac-toe game shared between concurrently running actors.
///
/// Every operation takes the lock for its own duration only. The raw grid
/// never leaves the lock; readers get copies.
#[derive(Debug)]
pub struct GameState {
    table: Mutex<Table>,
    turn_changed: Condvar,
}

impl GameState {
    /// Creates a new game: empty board, X to move, in progress.
    #[instrument]
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                board: Board::new(),
                current_turn: Player::X,
                status: GameStatus::InProgress,
                events: None,
            }),
            turn_changed: Condvar::new(),
        }
    }

    /// Publishes a [`GameEvent`] on `events` for every accepted move.
    pub fn with_events(self, events: Sender<GameEvent>) -> Self {
        self.lock().events = Some(events);
        self
    }

    // State is only written after a move is fully validated, so a panic
    // elsewhere never leaves the table half-updated.
    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempts a move at signed coordinates, returning whether it was accepted.
    ///
    /// A rejected move leaves the state untouched.
    pub fn attempt_move(&self, player: Player, row: isize, col: isize) -> bool {
        self.try_move(player, row, col).is_ok()
    }

    /// Attempts a move at signed coordinates, reporting why it was rejected.
    ///
    /// Checks run in order: game over, wrong turn, off the board, occupied.
    #[instrument(skip(self))]
    pub fn try_move(&self, player: Player, row: isize, col: isize) -> Result<GameStatus, MoveError> {
        let mut table = self.lock();
        let result = table
            .check_turn(player)
            .and_then(|()| Position::from_coords(row, col).ok_or(MoveError::OutOfBounds { row, col }))
            .and_then(|position| table.apply(player, position));
        self.settle(player, result)
    }

    /// Attempts a move at a validated position.
    #[instrument(skip(self))]
    pub fn place(&self, player: Player, position: Position) -> Result<GameStatus, MoveError> {
        let mut table = self.lock();
        let result = table
            .check_turn(player)
            .and_then(|()| table.apply(player, position));
        if let Ok(GameStatus::Won(winner)) = result
            && let Some(line) = winning_line(&table.board, winner)
        {
            debug!(?line, "Winning line");
        }
        self.settle(player, result)
    }

    fn settle(
        &self,
        player: Player,
        result: Result<GameStatus, MoveError>,
    ) -> Result<GameStatus, MoveError> {
        match &result {
            Ok(status) => {
                info!(%player, %status, "Move accepted");
                self.turn_changed.notify_all();
            }
            Err(error) => debug!(%player, %error, "Move rejected"),
        }
        result
    }

    /// True iff the game is in progress and it is `player`'s turn.
    #[instrument(level = "trace", skip(self))]
    pub fn is_turn_of(&self, player: Player) -> bool {
        let table = self.lock();
        !table.status.is_terminal() && table.current_turn == player
    }

    /// True once the game has been won or drawn.
    #[instrument(level = "trace", skip(self))]
    pub fn is_over(&self) -> bool {
        self.lock().status.is_terminal()
    }

    /// The game status. Only final after [`is_over`](Self::is_over) is true.
    pub fn winner(&self) -> GameStatus {
        self.lock().status
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.lock().board
    }

    /// Copy of board, turn and status taken together.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Blocks until it is `player`'s turn, the game ends, or `timeout` passes.
    ///
    /// The predicate is re-checked after every wake-up, spurious or not.
    #[instrument(level = "debug", skip(self))]
    pub fn wait_for_turn(&self, player: Player, timeout: Duration) -> TurnWait {
        let guard = self.lock();
        let (table, _) = self
            .turn_changed
            .wait_timeout_while(guard, timeout, |t| {
                !t.status.is_terminal() && t.current_turn != player
            })
            .unwrap_or_else(PoisonError::into_inner);

        if table.status.is_terminal() {
            TurnWait::Finished(table.status)
        } else if table.current_turn == player {
            TurnWait::Ready
        } else {
            TurnWait::TimedOut
        }
    }

    /// Blocks until the game ends or `timeout` passes.
    ///
    /// Returns the terminal status, or `None` on timeout.
    #[instrument(level = "debug", skip(self))]
    pub fn wait_until_over(&self, timeout: Duration) -> Option<GameStatus> {
        let guard = self.lock();
        let (table, _) = self
            .turn_changed
            .wait_timeout_while(guard, timeout, |t| !t.status.is_terminal())
            .unwrap_or_else(PoisonError::into_inner);
        table.status.is_terminal().then_some(table.status)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
