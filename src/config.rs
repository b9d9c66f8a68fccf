// src/config.rs
//
// Runtime configuration
//
// Resolution order (later wins):
// 1. Built-in defaults under the user's data directory
// 2. Optional `config.json` in that directory
// 3. Environment variables

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const DATABASE_ENV_VAR: &str = "BATTLE_MANAGER_DB";
pub const LOG_LEVEL_ENV_VAR: &str = "BATTLE_MANAGER_LOG";

const APP_DIR_NAME: &str = "battle_manager";
const CONFIG_FILE_NAME: &str = "config.json";
const DATABASE_FILE_NAME: &str = "battles.sqlite";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// Default `env_logger` filter; `RUST_LOG` still takes precedence
    pub log_level: String,
}

/// Shape of `config.json`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    log_level: Option<String>,
}

impl AppConfig {
    /// Resolve configuration for this process
    pub fn load() -> AppResult<Self> {
        let app_dir = get_app_data_dir()?;
        Self::resolve(&app_dir, |key| std::env::var(key).ok())
    }

    /// Resolve configuration rooted at `app_dir` with `env` as the
    /// environment lookup
    pub fn resolve<F>(app_dir: &Path, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            database_path: app_dir.join(DATABASE_FILE_NAME),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        };

        let config_path = app_dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            let contents = std::fs::read_to_string(&config_path)?;
            let file: ConfigFile = serde_json::from_str(&contents)?;

            if let Some(path) = file.database_path {
                // relative paths are relative to the config directory
                config.database_path = app_dir.join(path);
            }
            if let Some(level) = file.log_level {
                config.log_level = level;
            }
        }

        if let Some(path) = env(DATABASE_ENV_VAR).filter(|value| !value.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(level) = env(LOG_LEVEL_ENV_VAR).filter(|value| !value.trim().is_empty()) {
            config.log_level = level;
        }

        Ok(config)
    }
}

/// Get the application data directory
///
/// Path structure: {APP_DATA}/battle_manager
pub fn get_app_data_dir() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;
    Ok(data_dir.join(APP_DIR_NAME))
}
