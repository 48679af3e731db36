//! Error types for `SdrBoost`
//!
//! This module defines all error types used throughout the crate.
//!
//! Error variants use `#[source]` to preserve error chains so the log file
//! carries the full cause when a run fails.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `SdrBoost`
#[derive(Debug, Error)]
pub enum SdrBoostError {
    /// The brightness request could not be parsed as a number
    #[error("Cannot parse brightness value: {input:?}")]
    InputParse {
        /// The raw text as supplied by the user
        input: String,
    },

    /// The compositor library could not be loaded
    #[error("Failed to load compositor library {library}")]
    LibraryLoad {
        /// Library file name, e.g. `dwmapi.dll`
        library: String,
        /// Underlying loader error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The library loaded but exports nothing at the requested ordinal
    #[error("Ordinal {ordinal} not exported by {library}")]
    SymbolResolution {
        /// Library file name
        library: String,
        /// Export ordinal that was requested
        ordinal: u16,
    },

    /// Extended info query for one monitor failed
    ///
    /// Never aborts a run: the monitor is skipped.
    #[error("Failed to query monitor info for handle {handle:#x}")]
    MonitorQuery {
        /// Raw monitor handle value
        handle: isize,
    },

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for `SdrBoost` operations
pub type Result<T> = std::result::Result<T, SdrBoostError>;

/// Convert an error to a user-friendly message
///
/// A missing library and a missing ordinal get separate hints: the first
/// means the compositor is absent, the second means the private export moved.
pub fn get_user_friendly_error(error: &SdrBoostError) -> String {
    match error {
        SdrBoostError::InputParse { input } => {
            format!("Cannot parse, exiting: {input}")
        }
        SdrBoostError::LibraryLoad { library, .. } => {
            format!(
                "Unable to load {library}.\n\n\
                 The desktop compositor library is not available on this system.\n\
                 No brightness changes were made."
            )
        }
        SdrBoostError::SymbolResolution { library, ordinal } => {
            format!(
                "{library} does not export ordinal {ordinal}.\n\n\
                 This Windows build may have moved the SDR boost entry point.\n\
                 Try a different ordinal with --ordinal or in config.json.\n\
                 No brightness changes were made."
            )
        }
        SdrBoostError::MonitorQuery { handle } => {
            format!("Monitor {handle:#x} could not be queried and was skipped.")
        }
        SdrBoostError::ConfigError(e) => {
            format!(
                "Failed to load configuration:\n\n{e}\n\n\
                 Check %APPDATA%\\SdrBoost\\config.json"
            )
        }
        #[cfg(windows)]
        SdrBoostError::WindowsApiError(e) => {
            format!(
                "A Windows API error occurred:\n\n{e}\n\n\
                 Please ensure your Windows installation is up to date."
            )
        }
        SdrBoostError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_parse_display() {
        let error = SdrBoostError::InputParse {
            input: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot parse brightness value: \"abc\"");
    }

    #[test]
    fn test_input_parse_user_friendly() {
        let error = SdrBoostError::InputParse {
            input: "abc".to_string(),
        };
        assert_eq!(get_user_friendly_error(&error), "Cannot parse, exiting: abc");
    }

    #[test]
    fn test_library_load_keeps_source() {
        use std::error::Error as _;

        let error = SdrBoostError::LibraryLoad {
            library: "dwmapi.dll".to_string(),
            source: StringError::new("module not found"),
        };
        assert_eq!(error.to_string(), "Failed to load compositor library dwmapi.dll");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("module not found")
        );
    }

    #[test]
    fn test_missing_library_and_symbol_are_distinguished() {
        let load = SdrBoostError::LibraryLoad {
            library: "dwmapi.dll".to_string(),
            source: StringError::new("gone"),
        };
        let symbol = SdrBoostError::SymbolResolution {
            library: "dwmapi.dll".to_string(),
            ordinal: 171,
        };

        let load_msg = get_user_friendly_error(&load);
        let symbol_msg = get_user_friendly_error(&symbol);
        assert!(load_msg.contains("not available"));
        assert!(symbol_msg.contains("ordinal 171"));
        assert!(symbol_msg.contains("--ordinal"));
        assert_ne!(load_msg, symbol_msg);
    }

    #[test]
    fn test_monitor_query_display_is_hex() {
        let error = SdrBoostError::MonitorQuery { handle: 0x1_0001 };
        assert_eq!(
            error.to_string(),
            "Failed to query monitor info for handle 0x10001"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SdrBoostError = io_error.into();
        assert!(matches!(error, SdrBoostError::IoError(_)));
    }
}
