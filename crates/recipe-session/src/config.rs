//! Session settings from the environment.

use recipe_core::{Catalog, Difficulty, GameConfig};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("PUZZLE_DIFFICULTY: {0}")]
    Difficulty(String),

    #[error("PUZZLE_PLAYERS must name at least one player")]
    NoPlayers,

    #[error("Cannot read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] recipe_core::CatalogError),
}

/// Everything the session process needs before it can deal a puzzle
#[derive(Debug, Clone)]
pub struct Settings {
    pub game: GameConfig,
    /// JSON catalog to use instead of the built-in recipes
    pub catalog_path: Option<PathBuf>,
}

impl Settings {
    /// Read `PUZZLE_LANGUAGE`, `PUZZLE_DIFFICULTY`, `PUZZLE_PLAYERS` and `PUZZLE_CATALOG`
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut game = GameConfig::default();

        if let Some(language) = lookup("PUZZLE_LANGUAGE") {
            game.language = language;
        }
        if let Some(difficulty) = lookup("PUZZLE_DIFFICULTY") {
            game.difficulty = difficulty
                .parse::<Difficulty>()
                .map_err(SettingsError::Difficulty)?;
        }
        if let Some(players) = lookup("PUZZLE_PLAYERS") {
            game.players = players
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            if game.players.is_empty() {
                return Err(SettingsError::NoPlayers);
            }
        }

        Ok(Self {
            game,
            catalog_path: lookup("PUZZLE_CATALOG").map(PathBuf::from),
        })
    }

    /// Load the configured catalog, or the built-in one
    pub async fn load_catalog(&self) -> Result<Catalog, SettingsError> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::builtin());
        };

        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SettingsError::CatalogRead {
                path: path.clone(),
                source,
            })?;
        Ok(Catalog::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.game, GameConfig::default());
        assert!(settings.catalog_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("PUZZLE_LANGUAGE", "italiano"),
            ("PUZZLE_DIFFICULTY", "HARD"),
            ("PUZZLE_PLAYERS", "Ann, Bo ,,Cy"),
            ("PUZZLE_CATALOG", "/tmp/recipes.json"),
        ])
        .unwrap();

        assert_eq!(settings.game.language, "italiano");
        assert_eq!(settings.game.difficulty, Difficulty::Hard);
        assert_eq!(settings.game.players, vec!["Ann", "Bo", "Cy"]);
        assert_eq!(settings.catalog_path, Some(PathBuf::from("/tmp/recipes.json")));
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            settings(&[("PUZZLE_DIFFICULTY", "nightmare")]),
            Err(SettingsError::Difficulty(_))
        ));
        assert!(matches!(
            settings(&[("PUZZLE_PLAYERS", " , ")]),
            Err(SettingsError::NoPlayers)
        ));
    }

    #[tokio::test]
    async fn test_missing_catalog_file() {
        let settings = settings(&[("PUZZLE_CATALOG", "/nonexistent/recipes.json")]).unwrap();
        assert!(matches!(
            settings.load_catalog().await,
            Err(SettingsError::CatalogRead { .. })
        ));
    }
}
