//! Monitor data types
//!
//! Plain values produced by one enumeration pass. Nothing here owns an OS
//! resource: the handle is an identity token the OS manages.

/// `MONITORINFOF_PRIMARY`: this is the primary display
pub const MONITOR_FLAG_PRIMARY: u32 = 0x0000_0001;

/// Opaque `HMONITOR` identity stored as an integer
///
/// Never freed by this crate. Only valid while the display configuration
/// that produced it is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(isize);

impl MonitorHandle {
    /// Wrap a raw handle value
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    /// Raw handle value
    pub const fn raw(self) -> isize {
        self.0
    }
}

impl std::fmt::Display for MonitorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rectangle in virtual-screen coordinates
///
/// Always satisfies `right >= left` and `bottom >= top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorRect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge (exclusive)
    pub right: i32,
    /// Bottom edge (exclusive)
    pub bottom: i32,
}

impl MonitorRect {
    /// Build a rectangle from four edges, swapping any inverted pair
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// `right - left`
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    /// `bottom - top`
    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }
}

/// Everything the extended info query reports about one monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRecord {
    /// OS identity of the monitor
    pub handle: MonitorHandle,
    /// Full monitor bounds
    pub geometry: MonitorRect,
    /// Bounds minus taskbar and other reserved regions
    pub work_area: MonitorRect,
    /// `MONITORINFO::dwFlags`
    pub flags: u32,
    /// GDI device name, e.g. `\\.\DISPLAY1`
    pub device_name: String,
}

impl MonitorRecord {
    /// Whether the OS marks this as the primary display
    pub fn is_primary(&self) -> bool {
        self.flags & MONITOR_FLAG_PRIMARY == MONITOR_FLAG_PRIMARY
    }

    /// Width of the full monitor bounds
    pub fn width(&self) -> i64 {
        self.geometry.width()
    }

    /// Height of the full monitor bounds
    pub fn height(&self) -> i64 {
        self.geometry.height()
    }
}
