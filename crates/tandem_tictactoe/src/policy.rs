//! Move-selection policies.
//!
//! A policy only proposes. The shared game state decides, and the actor
//! feeds every rejected candidate back in as `tried` so that one turn
//! window never submits the same cell twice.

use crate::{Board, Position};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Strategy for choosing the next candidate cell.
pub trait MovePolicy: Send + std::fmt::Debug {
    /// Proposes a cell given the current board and the cells already
    /// rejected during this turn window. `None` means nothing is left to try.
    fn propose(&mut self, board: &Board, tried: &[Position]) -> Option<Position>;

    /// Which kind of policy this is.
    fn kind(&self) -> PolicyKind;
}

/// Names a policy in configuration and on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PolicyKind {
    /// Row-major scan for the first free cell.
    Sequential,
    /// Uniform random probing.
    Random,
}

impl PolicyKind {
    /// Human-readable strategy name for banners.
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Sequential => "sequential strategy",
            PolicyKind::Random => "random strategy",
        }
    }

    /// Builds the policy. `seed` only affects [`PolicyKind::Random`].
    #[instrument]
    pub fn build(self, seed: Option<u64>) -> Box<dyn MovePolicy> {
        match self {
            PolicyKind::Sequential => Box::new(Sequential),
            PolicyKind::Random => Box::new(RandomProbe::new(seed)),
        }
    }
}

/// Scans cells in row-major order and proposes the first empty one that
/// has not been tried yet this window.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl MovePolicy for Sequential {
    fn propose(&mut self, board: &Board, tried: &[Position]) -> Option<Position> {
        Position::ALL
            .into_iter()
            .find(|pos| board.is_empty(*pos) && !tried.contains(pos))
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Sequential
    }
}

/// Probes uniformly random cells until the game state accepts one.
///
/// The probe is blind to occupancy: it draws from every cell not yet
/// rejected this window and lets the game state do the validating.
#[derive(Debug, Clone)]
pub struct RandomProbe {
    rng: SmallRng,
}

impl RandomProbe {
    /// Creates a probe, reproducible when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl MovePolicy for RandomProbe {
    fn propose(&mut self, _board: &Board, tried: &[Position]) -> Option<Position> {
        let untried: Vec<Position> = Position::ALL
            .into_iter()
            .filter(|pos| !tried.contains(pos))
            .collect();
        if untried.is_empty() {
            return None;
        }
        let pick = untried[self.rng.random_range(0..untried.len())];
        trace!(%pick, remaining = untried.len(), "Random probe");
        Some(pick)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Square};
    use std::str::FromStr;

    #[test]
    fn test_sequential_skips_occupied_and_tried() {
        let mut board = Board::new();
        board.set(Position::ALL[0], Square::Occupied(Player::O));
        let mut policy = Sequential;
        assert_eq!(policy.propose(&board, &[]), Some(Position::ALL[1]));
        assert_eq!(
            policy.propose(&board, &[Position::ALL[1]]),
            Some(Position::ALL[2])
        );
    }

    #[test]
    fn test_sequential_exhausted() {
        let mut policy = Sequential;
        assert_eq!(policy.propose(&Board::new(), &Position::ALL), None);
    }

    #[test]
    fn test_random_never_repeats_within_window() {
        let mut policy = RandomProbe::new(Some(7));
        let board = Board::new();
        let mut tried = Vec::new();
        while let Some(pos) = policy.propose(&board, &tried) {
            assert!(!tried.contains(&pos));
            tried.push(pos);
        }
        assert_eq!(tried.len(), 9);
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let board = Board::new();
        let mut a = RandomProbe::new(Some(42));
        let mut b = RandomProbe::new(Some(42));
        for _ in 0..20 {
            assert_eq!(a.propose(&board, &[]), b.propose(&board, &[]));
        }
    }

    #[test]
    fn test_policy_kind_parsing() {
        assert_eq!(PolicyKind::from_str("sequential"), Ok(PolicyKind::Sequential));
        assert_eq!(PolicyKind::from_str("Random"), Ok(PolicyKind::Random));
        assert!(PolicyKind::from_str("minimax").is_err());
        assert_eq!(PolicyKind::Random.to_string(), "random");
        assert_eq!(PolicyKind::Random.build(Some(1)).kind(), PolicyKind::Random);
    }
}
