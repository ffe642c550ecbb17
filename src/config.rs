// src/config.rs
use crate::errors::ServerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "options.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Loopback address the board is served on.
    pub bind_addr: String,
    pub max_workers: usize,
    /// SQLite file holding favorites, rejections and filter choices.
    pub database_path: String,
    /// Scraped listing document (hash -> housing data). Optional.
    pub data_file: String,
    /// Characterization document (hash -> {housing_data, char_output}).
    pub char_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_workers: 8,
            database_path: "listing_board.sqlite3".to_string(),
            data_file: "data/scraped_data.json".to_string(),
            char_file: "data/characterization.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Read the options file. A missing file yields defaults and writes them
    /// out so the user has something to edit; a malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();

        if !path.is_file() {
            log::info!(
                "Config file {} not found, creating default",
                path.display()
            );
            let cfg = AppConfig::default();
            if let Err(e) = cfg.write(path) {
                log::warn!("Could not write default config: {e}");
            }
            return Ok(cfg);
        }

        log::debug!("Reading config file {}", path.display());
        let raw = fs::read_to_string(path)
            .map_err(|e| ServerError::DataError(format!("Failed to read config: {e}")))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ServerError> {
        let cfg: AppConfig = toml::from_str(raw)
            .map_err(|e| ServerError::DataError(format!("Invalid config: {e}")))?;

        if cfg.max_workers == 0 {
            return Err(ServerError::DataError(
                "Invalid config: max_workers must be at least 1".into(),
            ));
        }
        Ok(cfg)
    }

    fn write(&self, path: &Path) -> Result<(), ServerError> {
        let body = toml::to_string_pretty(self)
            .map_err(|e| ServerError::DataError(format!("Failed to encode config: {e}")))?;
        fs::write(path, body)
            .map_err(|e| ServerError::DataError(format!("Failed to write config: {e}")))
    }
}
