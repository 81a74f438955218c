//! End-to-end tests for the match runner.

use clap::Parser;
use tandem::{Cli, MatchConfig, run_match, run_match_with};
use tandem_tictactoe::{Board, GameStatus, MovePolicy, Player, PolicyKind, Position};

/// Dies on its first turn, leaving the other player waiting.
#[derive(Debug)]
struct Crashing;

impl MovePolicy for Crashing {
    fn propose(&mut self, _board: &Board, _tried: &[Position]) -> Option<Position> {
        panic!("policy crashed");
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Sequential
    }
}

fn quick(args: &[&str]) -> MatchConfig {
    let mut argv = vec!["tandem", "--poll-ms", "1", "--move-delay-ms", "0"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
        .expect("valid flags")
        .apply(MatchConfig::default())
}

#[test]
fn test_default_match_renders_every_move() {
    let config = quick(&["--seed", "11"]);
    let mut out = Vec::new();
    let summary = run_match(&config, &mut out).expect("match runs");
    let text = String::from_utf8(out).expect("utf-8 output");

    assert!(text.starts_with("Starting concurrent tic-tac-toe...\n"));
    assert!(text.contains("Player X: sequential strategy"));
    assert!(text.contains("Player O: random strategy"));
    assert_eq!(text.matches("Current player:").count(), summary.moves());

    let last = text.lines().last().expect("final line");
    assert_eq!(last, format!("Final result: {}", summary.status()));
    assert!(last.ends_with(" won!") || last.ends_with("Draw!"));
}

#[test]
fn test_blocking_match_finishes() {
    for seed in 0..5 {
        let config = quick(&["--wait-mode", "block", "--seed", &seed.to_string()]);
        let summary = run_match(&config, &mut std::io::sink()).expect("match runs");
        assert!(summary.status().is_terminal());
        assert!(summary.moves() >= 5 && summary.moves() <= 9);
        // X opens, so X has made the same number of moves as O or one more.
        let (x, o) = (*summary.x().moves(), *summary.o().moves());
        assert!(x == o || x == o + 1);
    }
}

#[test]
fn test_sequential_mirror_match_output() {
    let config = quick(&["--o-policy", "sequential"]);
    let mut out = Vec::new();
    let summary = run_match(&config, &mut out).expect("match runs");
    let text = String::from_utf8(out).expect("utf-8 output");

    assert_eq!(summary.moves(), 7);
    assert_eq!(summary.winner(), Some(Player::X));
    assert!(text.contains("Player X played (2, 0)"));
    assert!(text.ends_with("Final result: Player X won!\n"));
}

#[test]
fn test_crashed_player_fails_the_match() {
    let config = quick(&[]);
    let o = PolicyKind::Sequential.build(None);
    let mut out = Vec::new();
    let error = run_match_with(&config, Box::new(Crashing), o, &mut out)
        .expect_err("a crashed player cannot finish the game");
    assert_eq!(error.to_string(), "Player X thread panicked");

    let text = String::from_utf8(out).expect("utf-8 output");
    assert!(!text.contains("Final result"));
}

#[test]
fn test_winner_follows_status() {
    for seed in 0..20 {
        let config = quick(&["--x-policy", "random", "--seed", &seed.to_string()]);
        let summary = run_match(&config, &mut std::io::sink()).expect("match runs");
        match summary.status() {
            GameStatus::Won(player) => {
                assert_eq!(summary.winner(), Some(*player))
            }
            _ => assert_eq!(summary.winner(), None),
        }
    }
}
