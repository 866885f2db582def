//! Application-level configuration loading, including the storage backend selection.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::game_store::file::STORE_PATH_ENV;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "VOTING_BACK_CONFIG_PATH";

/// Storage backend holding the games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Games live in process memory and vanish on restart.
    #[default]
    Memory,
    /// Games are written as JSON documents below `path`.
    File {
        /// Directory holding the game files.
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    store: StoreConfig,
    seed_sample_game: bool,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    ///
    /// [`STORE_PATH_ENV`] wins over whatever store the file selects.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        store = ?config.store,
                        "loaded configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.with_store_override(env::var_os(STORE_PATH_ENV).map(PathBuf::from))
    }

    fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    fn with_store_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path.filter(|path| !path.as_os_str().is_empty()) {
            info!(path = %path.display(), "file store forced by {STORE_PATH_ENV}");
            self.store = StoreConfig::File { path };
        }
        self
    }

    /// Selected storage backend.
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Whether the Eurovision 2024 sample game is saved at start-up.
    pub fn seed_sample_game(&self) -> bool {
        self.seed_sample_game
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            seed_sample_game: true,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    store: StoreConfig,
    #[serde(default = "default_seed_sample_game")]
    seed_sample_game: bool,
}

fn default_seed_sample_game() -> bool {
    true
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            store: value.store,
            seed_sample_game: value.seed_sample_game,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store(), &StoreConfig::Memory);
        assert!(config.seed_sample_game());
    }

    #[test]
    fn file_store_is_parsed() {
        let config = AppConfig::from_json(
            r#"{ "store": { "kind": "file", "path": "/var/lib/voting" }, "seed_sample_game": false }"#,
        )
        .unwrap();
        assert_eq!(
            config.store(),
            &StoreConfig::File {
                path: PathBuf::from("/var/lib/voting")
            }
        );
        assert!(!config.seed_sample_game());
    }

    #[test]
    fn unknown_store_kind_is_rejected() {
        assert!(AppConfig::from_json(r#"{ "store": { "kind": "sqlite" } }"#).is_err());
    }

    #[test]
    fn store_path_override_forces_file_store() {
        let config = AppConfig::default().with_store_override(Some("/tmp/games".into()));
        assert_eq!(
            config.store(),
            &StoreConfig::File {
                path: PathBuf::from("/tmp/games")
            }
        );

        let config = AppConfig::default().with_store_override(Some(PathBuf::new()));
        assert_eq!(config.store(), &StoreConfig::Memory);
    }
}
