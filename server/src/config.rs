//! Configuration management for the server.

use std::env;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory holding the collection files
    pub data_dir: PathBuf,
    /// Directory of the bundled frontend build
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let data_dir = non_empty_path("DATA_DIR")?.unwrap_or_else(|| PathBuf::from("data"));
        let static_dir = non_empty_path("STATIC_DIR")?.unwrap_or_else(|| PathBuf::from("dist"));

        Ok(Self {
            host,
            port,
            data_dir,
            static_dir,
        })
    }
}

fn non_empty_path(key: &'static str) -> Result<Option<PathBuf>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath(key)),
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("{0} must not be empty")]
    EmptyPath(&'static str),
}
