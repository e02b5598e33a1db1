//! Session configuration.
//!
//! Language and difficulty live here instead of in global state; a
//! re-initialization takes an updated copy of this value.

use crate::hints::{DEFAULT_HINT_DISPLAY_SECS, DEFAULT_HINT_USES};
use crate::player::MAX_PLAYERS;
use crate::puzzle::Difficulty;
use crate::recipe::{CatalogError, DEFAULT_LANGUAGE};
use crate::turn::DEFAULT_TURN_SECONDS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in a session configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Must have 1-{max} players, got {0}", max = MAX_PLAYERS)]
    PlayerCount(usize),

    #[error("Player name must not be empty")]
    EmptyPlayerName,

    #[error("Turn length must be at least one second")]
    ZeroTurnLength,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Everything needed to set up a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Catalog key of the recipe to play
    pub language: String,
    pub difficulty: Difficulty,
    /// Player names in turn order
    pub players: Vec<String>,
    pub turn_seconds: u32,
    pub hint_uses: u8,
    pub hint_display_secs: u64,
}

impl GameConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount(self.players.len()));
        }
        if self.players.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyPlayerName);
        }
        if self.turn_seconds == 0 {
            return Err(ConfigError::ZeroTurnLength);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            difficulty: Difficulty::Medium,
            players: vec!["Player 1".to_string(), "Player 2".to_string()],
            turn_seconds: DEFAULT_TURN_SECONDS,
            hint_uses: DEFAULT_HINT_USES,
            hint_display_secs: DEFAULT_HINT_DISPLAY_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.language, "english");
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.turn_seconds, 300);
    }

    #[test]
    fn test_player_bounds() {
        let mut config = GameConfig {
            players: vec![],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::PlayerCount(0))));

        config.players = (1..=5).map(|i| format!("P{}", i)).collect();
        assert!(matches!(config.validate(), Err(ConfigError::PlayerCount(5))));

        config.players = vec!["Solo".to_string()];
        assert!(config.validate().is_ok());

        config.players = vec!["  ".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPlayerName)));
    }

    #[test]
    fn test_zero_turn_length() {
        let config = GameConfig {
            turn_seconds: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTurnLength)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "difficulty": "hard", "players": ["Ann"] }"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.players, vec!["Ann".to_string()]);
        assert_eq!(config.language, "english");
        assert_eq!(config.hint_uses, 3);
    }
}
