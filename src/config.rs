//! Session configuration.

use crate::session::GameMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use slash_core::Player;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Two humans, or a human against the bot.
    #[serde(default = "default_mode")]
    mode: GameMode,

    /// Seconds on each player's clock per turn.
    #[serde(default = "default_turn_seconds")]
    turn_seconds: u64,

    /// Pause before the bot answers, in milliseconds.
    #[serde(default = "default_bot_delay_ms")]
    bot_delay_ms: u64,

    /// Seat the bot plays in bot mode, `p1` or `p2`.
    #[serde(default = "default_bot_player")]
    bot_player: Player,
}

fn default_mode() -> GameMode {
    GameMode::Pve
}

fn default_turn_seconds() -> u64 {
    30
}

fn default_bot_delay_ms() -> u64 {
    700
}

fn default_bot_player() -> Player {
    Player::P2
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            turn_seconds: default_turn_seconds(),
            bot_delay_ms: default_bot_delay_ms(),
            bot_player: default_bot_player(),
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, turn_seconds = config.turn_seconds, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.turn_seconds == 0 {
            return Err(ConfigError::new(
                "turn_seconds must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Replaces the mode, as from a command-line flag.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Time each player has per turn.
    pub fn turn_limit(&self) -> Duration {
        Duration::from_secs(self.turn_seconds)
    }

    /// Bot thinking delay.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
