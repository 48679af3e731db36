//! SDR-to-HDR boost module
//!
//! This module resolves and calls the compositor's private SDR content
//! brightness entry point.
//!
//! # Overview
//!
//! - **Capability probe**: load the library and look up the ordinal, reported as
//!   `Resolved`, `LibraryMissing` or `SymbolMissing`
//! - **Boost invocation**: one unchecked call per monitor, no return value
//! - **Windows version detection** so logs tie the ordinal to an OS build
//!
//! # Architecture
//!
//! - `BoostCapability`: tagged probe result, no raw addresses leak out
//! - `BoostFunction`: the resolved entry point, resolved once per run
//! - `BoostTarget`: trait the orchestrator applies brightness through
//! - `WindowsVersion`: build classification
//! - `windows_api`: loader wrappers and the entry point's assumed signature
//!
//! # The Ordinal
//!
//! `dwmapi.dll` exports `DwmpSDRToHDRBoost` without a name, at ordinal 171 on
//! the builds this was written against. Nothing guarantees that. The ordinal
//! can be overridden (`--ordinal`, or `ordinal` in config.json) when a build
//! moves it.
//!
//! # Example Usage
//!
//! ```no_run
//! use sdrboost::brightness::BrightnessLevel;
//! use sdrboost::config::BoostConfig;
//! use sdrboost::hdr::{BoostTarget, acquire_boost_function};
//! use sdrboost::monitor::{MonitorSource, SystemMonitors};
//!
//! let boost = acquire_boost_function(&BoostConfig::default())?;
//! let level = BrightnessLevel::clamped(3.5);
//! for monitor in SystemMonitors.enumerate_monitors() {
//!     boost.apply(monitor.handle, level);
//! }
//! # Ok::<(), sdrboost::error::SdrBoostError>(())
//! ```

pub mod boost;
pub mod version;
pub mod windows_api;

pub use boost::{
    BoostCapability, BoostFunction, BoostTarget, acquire_boost_function, probe_boost_function,
};
pub use version::WindowsVersion;
