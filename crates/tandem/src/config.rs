//! Match configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tandem_tictactoe::{Pacing, PolicyKind, WaitMode};
use tracing::{debug, info, instrument};

/// Configuration for one match, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Strategy for player X.
    pub(crate) x_policy: PolicyKind,

    /// Strategy for player O.
    pub(crate) o_policy: PolicyKind,

    /// Seed for the random strategy. OS entropy when absent.
    pub(crate) seed: Option<u64>,

    /// Milliseconds between turn checks while waiting.
    pub(crate) poll_interval_ms: u64,

    /// Milliseconds to pause after an accepted move.
    pub(crate) move_delay_ms: u64,

    /// How players wait for their turn.
    pub(crate) wait_mode: WaitMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            x_policy: PolicyKind::Sequential,
            o_policy: PolicyKind::Random,
            seed: None,
            poll_interval_ms: 100,
            move_delay_ms: 500,
            wait_mode: WaitMode::Poll,
        }
    }
}

impl MatchConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(x = %config.x_policy, o = %config.o_policy, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Actor loop timing.
    pub fn pacing(&self) -> Pacing {
        Pacing::new(
            Duration::from_millis(self.poll_interval_ms),
            Duration::from_millis(self.move_delay_ms),
        )
    }

    /// Seed for the given player's policy, offset so X and O draw
    /// independent streams from one configured seed.
    pub fn seed_for(&self, offset: u64) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(offset))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "o_policy = \"sequential\"\nseed = 7\nwait_mode = \"block\"").expect("write");

        let config = MatchConfig::from_file(file.path()).expect("valid config");
        assert_eq!(*config.x_policy(), PolicyKind::Sequential);
        assert_eq!(*config.o_policy(), PolicyKind::Sequential);
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(*config.wait_mode(), WaitMode::Block);
        assert_eq!(*config.move_delay_ms(), 500);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = MatchConfig::load_or_default(dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "x_policy = \"minimax\"").expect("write");

        let err = MatchConfig::load_or_default(file.path()).expect_err("bad policy");
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_pacing_and_seeds() {
        let config = MatchConfig {
            seed: Some(u64::MAX),
            ..MatchConfig::default()
        };
        assert_eq!(*config.pacing().poll_interval(), Duration::from_millis(100));
        assert_eq!(config.seed_for(1), Some(0));
        assert_eq!(MatchConfig::default().seed_for(1), None);
    }
}
