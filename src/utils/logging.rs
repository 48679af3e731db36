//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to %APPDATA%\SdrBoost\sdrboost.log.
//! Each run rotates the previous logs so the last ten runs are kept.

use crate::config::ConfigManager;
use crate::error::{Result, SdrBoostError, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (sdrboost.log.1 through sdrboost.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Base name of the log file
const LOG_FILE_PREFIX: &str = "sdrboost";

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
pub fn init_logging() -> Result<()> {
    let log_dir = ConfigManager::get_app_dir();
    std::fs::create_dir_all(&log_dir)?;

    rotate_logs_on_startup(&log_dir.join(format!("{LOG_FILE_PREFIX}.log")))?;

    // Rotation is done above, once per run, so the appender never rolls itself
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| SdrBoostError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SdrBoostError::ConfigError(Box::new(e)))?;

    tracing::info!("SdrBoost v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Shift `name.log` -> `name.log.1` -> ... -> `name.log.9`, dropping the oldest
///
/// Does nothing when there is no current log.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| SdrBoostError::ConfigError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| SdrBoostError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        if current_log.exists() {
            std::fs::rename(&current_log, log_dir.join(format!("{log_name}.{}", i + 1)))?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::fs;

    #[test]
    fn test_rotate_moves_current_log() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("sdrboost.log");
        fs::write(&log_path, "run 1").unwrap();

        rotate_logs_on_startup(&log_path).unwrap();

        assert!(!log_path.exists());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("sdrboost.log.1")).unwrap(),
            "run 1"
        );
    }

    #[test]
    fn test_rotate_without_log_is_noop() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("sdrboost.log");

        rotate_logs_on_startup(&log_path).unwrap();

        assert!(!temp_dir.path().join("sdrboost.log.1").exists());
    }

    #[test]
    fn test_rotate_keeps_newest_runs() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("sdrboost.log");

        for run in 1..=12 {
            fs::write(&log_path, format!("run {run}")).unwrap();
            rotate_logs_on_startup(&log_path).unwrap();
        }

        for i in 1..=MAX_LOG_FILES {
            assert!(temp_dir.path().join(format!("sdrboost.log.{i}")).exists());
        }
        assert!(!temp_dir.path().join("sdrboost.log.10").exists());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("sdrboost.log.1")).unwrap(),
            "run 12"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("sdrboost.log.9")).unwrap(),
            "run 4"
        );
    }

    #[test]
    fn test_rotate_with_gaps() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("sdrboost.log");
        fs::write(&log_path, "current").unwrap();
        fs::write(temp_dir.path().join("sdrboost.log.5"), "old").unwrap();

        rotate_logs_on_startup(&log_path).unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("sdrboost.log.6")).unwrap(),
            "old"
        );
        assert!(!temp_dir.path().join("sdrboost.log.2").exists());
    }
}
