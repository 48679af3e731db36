//! Monitor enumeration
//!
//! Walks every active display with `EnumDisplayMonitors` and queries each
//! handle with `GetMonitorInfoW`. A monitor whose query fails is left out;
//! the pass as a whole never fails.

use crate::error::Result;
use crate::monitor::types::{MonitorHandle, MonitorRecord};
use tracing::{debug, info};

/// Something that can list the connected monitors
///
/// Order is whatever the OS reports. It is stable within one call and may
/// differ between calls.
pub trait MonitorSource {
    /// Produce a fresh list of monitors whose info query succeeded
    fn enumerate_monitors(&self) -> Vec<MonitorRecord>;
}

/// The monitors attached to this machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMonitors;

impl MonitorSource for SystemMonitors {
    fn enumerate_monitors(&self) -> Vec<MonitorRecord> {
        #[cfg(windows)]
        {
            win32::enumerate()
        }

        #[cfg(not(windows))]
        {
            debug!("Monitor enumeration is only available on Windows");
            Vec::new()
        }
    }
}

/// Records gathered during a single enumeration call
#[derive(Debug, Default)]
struct MonitorCollector {
    records: Vec<MonitorRecord>,
    skipped: usize,
}

impl MonitorCollector {
    fn accept(&mut self, handle: MonitorHandle, result: Result<MonitorRecord>) {
        match result {
            Ok(record) => {
                debug!(
                    "Monitor {} ({}): {}x{}, primary={}",
                    handle,
                    record.device_name,
                    record.width(),
                    record.height(),
                    record.is_primary()
                );
                self.records.push(record);
            }
            Err(e) => {
                debug!("Skipping monitor {}: {}", handle, e);
                self.skipped += 1;
            }
        }
    }

    fn finish(self) -> Vec<MonitorRecord> {
        info!(
            "Enumerated {} monitor(s), skipped {}",
            self.records.len(),
            self.skipped
        );
        self.records
    }
}

/// Build the record list from handles in visiting order, dropping any
/// handle whose query fails
pub fn collect_monitors<I, Q>(handles: I, mut query: Q) -> Vec<MonitorRecord>
where
    I: IntoIterator<Item = MonitorHandle>,
    Q: FnMut(MonitorHandle) -> Result<MonitorRecord>,
{
    let mut collector = MonitorCollector::default();
    for handle in handles {
        collector.accept(handle, query(handle));
    }
    collector.finish()
}

#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Required for Windows FFI to call EnumDisplayMonitors and GetMonitorInfoW"
)]
mod win32 {
    use super::MonitorCollector;
    use crate::error::{Result, SdrBoostError};
    use crate::monitor::types::{MonitorHandle, MonitorRecord, MonitorRect};
    use std::mem::size_of;
    use tracing::warn;
    use windows::Win32::Foundation::{LPARAM, RECT};
    use windows::Win32::Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
    };
    use windows::core::BOOL;

    pub(super) fn enumerate() -> Vec<MonitorRecord> {
        let mut collector = MonitorCollector::default();

        // SAFETY: the collector outlives the call and the callback is the only
        // code that dereferences the pointer, always on this thread.
        let ok = unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(enum_monitor_proc),
                LPARAM((&raw mut collector) as isize),
            )
        };
        if !ok.as_bool() {
            warn!("EnumDisplayMonitors reported failure, keeping monitors visited so far");
        }

        collector.finish()
    }

    unsafe extern "system" fn enum_monitor_proc(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _clip: *mut RECT,
        data: LPARAM,
    ) -> BOOL {
        // SAFETY: `data` is the collector pointer passed by `enumerate`, valid
        // until EnumDisplayMonitors returns.
        let collector = unsafe { &mut *(data.0 as *mut MonitorCollector) };
        let handle = MonitorHandle::from_raw(hmonitor.0 as isize);
        collector.accept(handle, query_monitor(hmonitor, handle));

        // continue enumeration
        true.into()
    }

    fn query_monitor(hmonitor: HMONITOR, handle: MonitorHandle) -> Result<MonitorRecord> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "size_of::<MONITORINFOEXW>() is a compile-time constant that fits in u32"
        )]
        let mut info = MONITORINFOEXW {
            monitorInfo: MONITORINFO {
                cbSize: size_of::<MONITORINFOEXW>() as u32,
                ..Default::default()
            },
            ..Default::default()
        };

        // SAFETY: `info` is a properly sized MONITORINFOEXW and cbSize says so.
        let ok = unsafe { GetMonitorInfoW(hmonitor, (&raw mut info).cast::<MONITORINFO>()) };
        if !ok.as_bool() {
            return Err(SdrBoostError::MonitorQuery {
                handle: handle.raw(),
            });
        }

        let rc = info.monitorInfo.rcMonitor;
        let work = info.monitorInfo.rcWork;
        let name_len = info
            .szDevice
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(info.szDevice.len());

        Ok(MonitorRecord {
            handle,
            geometry: MonitorRect::from_edges(rc.left, rc.top, rc.right, rc.bottom),
            work_area: MonitorRect::from_edges(work.left, work.top, work.right, work.bottom),
            flags: info.monitorInfo.dwFlags,
            device_name: String::from_utf16_lossy(&info.szDevice[..name_len]),
        })
    }
}
