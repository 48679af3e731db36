//! Configuration management module
//!
//! This module loads the optional, read-only configuration from
//! %APPDATA%\SdrBoost\config.json. A missing or unreadable file means defaults.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::BoostConfig;
