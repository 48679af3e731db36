//! Configuration data models
//!
//! Only the location of the boost entry point is configurable. Brightness is
//! never stored.

use crate::hdr::windows_api::{DWMAPI_LIBRARY, SDR_TO_HDR_BOOST_ORDINAL};
use serde::{Deserialize, Serialize};

/// Where to find the SDR-to-HDR boost entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    /// Library file name passed to the loader
    pub library: String,
    /// Export ordinal of the boost function in that library
    pub ordinal: u16,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            library: DWMAPI_LIBRARY.to_string(),
            ordinal: SDR_TO_HDR_BOOST_ORDINAL,
        }
    }
}

impl BoostConfig {
    /// Apply command-line overrides on top of the loaded values
    #[must_use]
    pub fn with_overrides(mut self, library: Option<String>, ordinal: Option<u16>) -> Self {
        if let Some(library) = library {
            self.library = library;
        }
        if let Some(ordinal) = ordinal {
            self.ordinal = ordinal;
        }
        self
    }
}
