//! Runtime configuration from the environment

use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_APP_ENV: &str = "development";
pub const DEFAULT_PLUGIN_DIR: &str = "plugins";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app_env: String,
    pub debug: bool,
    pub plugin_dir: PathBuf,
    pub history_file: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Read the process environment; call [`load_dotenv`] first
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            app_env: lookup("APP_ENV")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APP_ENV.to_string()),
            debug: lookup("DEBUG").is_some_and(|v| is_truthy(&v)),
            plugin_dir: path("CALC_PLUGIN_DIR", DEFAULT_PLUGIN_DIR),
            history_file: path("CALC_HISTORY_FILE", calc_history::DEFAULT_HISTORY_FILE),
            log_dir: path("CALC_LOG_DIR", DEFAULT_LOG_DIR),
        }
    }
}

/// Load `.env` from the working directory or a parent.
/// Returns the file used, `None` when there is none.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    missing_is_none(dotenvy::dotenv())
}

/// Load a specific env file. Returns whether it existed.
pub fn load_env_file(path: &Path) -> Result<bool, dotenvy::Error> {
    missing_is_none(dotenvy::from_path(path)).map(|loaded| loaded.is_some())
}

fn missing_is_none<T>(result: Result<T, dotenvy::Error>) -> Result<Option<T>, dotenvy::Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "True" | "true" | "1")
}
