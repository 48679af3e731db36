//! Configuration manager for loading the boost configuration
//!
//! Reads %APPDATA%\SdrBoost\config.json. The tool never writes this file.

use crate::config::models::BoostConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the application data directory
    ///
    /// Returns: %APPDATA%\SdrBoost (or `.\SdrBoost` when APPDATA is unset)
    pub fn get_app_dir() -> PathBuf {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("SdrBoost")
    }

    /// Get the path to the configuration file
    ///
    /// Returns: %APPDATA%\SdrBoost\config.json
    pub fn get_config_path() -> PathBuf {
        Self::get_app_dir().join("config.json")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<BoostConfig> {
        Self::load_from(&Self::get_config_path())
    }

    /// Load configuration from `path`
    ///
    /// If the file doesn't exist or is corrupt, returns the default configuration.
    pub fn load_from(path: &Path) -> Result<BoostConfig> {
        if !path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(BoostConfig::default());
        }

        let json = std::fs::read_to_string(path)?;

        match serde_json::from_str::<BoostConfig>(&json) {
            Ok(config) => {
                info!(
                    "Configuration loaded: library={}, ordinal={}",
                    config.library, config.ordinal
                );
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(BoostConfig::default())
            }
        }
    }
}
