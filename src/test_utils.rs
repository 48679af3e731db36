#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `SdrBoost` unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use crate::brightness::BrightnessLevel;
use crate::hdr::BoostTarget;
use crate::monitor::{MonitorHandle, MonitorRecord, MonitorRect, MonitorSource};
use parking_lot::Mutex;
use std::cell::Cell;
use tempfile::TempDir;

/// Serializes tests that modify the APPDATA environment variable.
static APPDATA_LOCK: Mutex<()> = Mutex::new(());

/// Create a temporary test directory that is removed on drop.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// RAII guard that points APPDATA at a temp directory for a test scope
/// and restores the original value when dropped.
///
/// The lock is held for the guard's lifetime so no two tests change
/// APPDATA at the same time.
pub struct AppdataGuard {
    original: Option<String>,
    _lock: parking_lot::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding APPDATA_LOCK"
)]
impl AppdataGuard {
    /// Set APPDATA to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = APPDATA_LOCK.lock();
        let original = std::env::var("APPDATA").ok();
        // SAFETY: APPDATA_LOCK serializes every writer and reader of APPDATA in tests.
        unsafe {
            std::env::set_var("APPDATA", temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding APPDATA_LOCK"
)]
impl Drop for AppdataGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held until this guard is gone.
        unsafe {
            match self.original.take() {
                Some(original) => std::env::set_var("APPDATA", original),
                None => std::env::remove_var("APPDATA"),
            }
        }
    }
}

/// A monitor record with plausible geometry for the given raw handle.
pub fn fake_monitor(raw: isize) -> MonitorRecord {
    MonitorRecord {
        handle: MonitorHandle::from_raw(raw),
        geometry: MonitorRect::from_edges(0, 0, 1920, 1080),
        work_area: MonitorRect::from_edges(0, 0, 1920, 1040),
        flags: 0,
        device_name: format!(r"\\.\DISPLAY{raw}"),
    }
}

/// Monitor source returning a fixed list and counting calls.
#[derive(Default)]
pub struct FixedMonitors {
    monitors: Vec<MonitorRecord>,
    calls: Cell<usize>,
}

impl FixedMonitors {
    /// Source that reports one monitor per raw handle, in order.
    pub fn new(raw: &[isize]) -> Self {
        Self {
            monitors: raw.iter().copied().map(fake_monitor).collect(),
            calls: Cell::new(0),
        }
    }

    /// How many times enumeration ran.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MonitorSource for FixedMonitors {
    fn enumerate_monitors(&self) -> Vec<MonitorRecord> {
        self.calls.set(self.calls.get() + 1);
        self.monitors.clone()
    }
}

/// Boost target that records every call.
#[derive(Default)]
pub struct RecordingTarget {
    calls: Mutex<Vec<(isize, f64)>>,
}

impl RecordingTarget {
    /// Calls seen so far as `(raw handle, level)`.
    pub fn calls(&self) -> Vec<(isize, f64)> {
        self.calls.lock().clone()
    }
}

impl BoostTarget for RecordingTarget {
    fn apply(&self, monitor: MonitorHandle, level: BrightnessLevel) {
        self.calls.lock().push((monitor.raw(), level.value()));
    }
}
