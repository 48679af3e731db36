//! Monitor discovery module
//!
//! This module lists the displays the boost is applied to.
//!
//! # Overview
//!
//! - **Enumeration** of every active display via `EnumDisplayMonitors`
//! - **Extended info** (bounds, work area, flags, device name) via `GetMonitorInfoW`
//! - **Skip on failure**: a monitor whose info query fails is omitted, never fatal
//!
//! # Architecture
//!
//! - `MonitorSource`: trait the orchestrator enumerates through
//! - `SystemMonitors`: the OS implementation (empty on non-Windows targets)
//! - `MonitorRecord`: one display, produced fresh per call and never cached
//!
//! # Example Usage
//!
//! ```no_run
//! use sdrboost::monitor::{MonitorSource, SystemMonitors};
//!
//! for monitor in SystemMonitors.enumerate_monitors() {
//!     println!("{} {}x{}", monitor.handle, monitor.width(), monitor.height());
//! }
//! ```

pub mod enumerator;
pub mod types;

pub use enumerator::{MonitorSource, SystemMonitors, collect_monitors};
pub use types::{MONITOR_FLAG_PRIMARY, MonitorHandle, MonitorRecord, MonitorRect};
