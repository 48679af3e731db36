//! `SdrBoost` - SDR content brightness for HDR displays on Windows
//!
//! Applies one SDR-to-HDR boost level to every connected display through the
//! desktop compositor's private, ordinal-only `DwmpSDRToHDRBoost` export.
//! `monitor` finds the displays, `hdr` resolves and calls the export, and
//! `controller` sequences a run.
//!
//! # Requirements
//!
//! - Windows 10 or Windows 11 with `dwmapi.dll` exporting the boost at the
//!   configured ordinal (171 by default)
//! - HDR enabled on the displays for the boost to be visible

// Module declarations
pub mod brightness;
pub mod config;
pub mod controller;
pub mod error;
pub mod hdr;
pub mod monitor;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{Result, SdrBoostError};
