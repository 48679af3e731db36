//! Raw loader access for the compositor's private export
//!
//! `dwmapi.dll` exports the SDR-to-HDR boost only by ordinal. Nothing about
//! it is documented: the ordinal, the argument list and the calling
//! convention are what current Windows builds happen to use.
//!
//! Higher layers never see a raw address; they get a [`DwmpSdrToHdrBoostFn`]
//! or nothing.

use std::ffi::c_void;

/// Library that exports the boost entry point
pub const DWMAPI_LIBRARY: &str = "dwmapi.dll";

/// Export ordinal of `DwmpSDRToHDRBoost` on current Windows builds
pub const SDR_TO_HDR_BOOST_ORDINAL: u16 = 171;

/// `void DwmpSDRToHDRBoost(HMONITOR monitor, double brightness)`
///
/// No return value and no error signal.
pub type DwmpSdrToHdrBoostFn = unsafe extern "system" fn(monitor: *mut c_void, brightness: f64);

/// Error type for the loader wrappers
pub type LoaderError = Box<dyn std::error::Error + Send + Sync>;

/// An `HMODULE` that is never freed
///
/// The module stays mapped until the process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryHandle(isize);

impl LibraryHandle {
    /// Raw module handle value
    pub fn raw(self) -> isize {
        self.0
    }
}

/// `MAKEINTRESOURCEA`: encode an ordinal where `GetProcAddress` expects a name
///
/// The high bits are zero, which is how the loader tells ordinals from
/// string pointers.
pub fn ordinal_as_name(ordinal: u16) -> *const u8 {
    usize::from(ordinal) as *const u8
}

/// Load a library by file name
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Required for Windows FFI to call LoadLibraryW"
)]
pub fn load_library(name: &str) -> Result<LibraryHandle, LoaderError> {
    use windows::Win32::System::LibraryLoader::LoadLibraryW;
    use windows::core::HSTRING;

    let wide_name = HSTRING::from(name);
    // SAFETY: `wide_name` is a valid NUL-terminated wide string for the call.
    let module = unsafe { LoadLibraryW(&wide_name) }?;
    Ok(LibraryHandle(module.0 as isize))
}

/// Stub implementation for non-Windows platforms
///
/// Always fails: there is no desktop compositor library to load.
#[cfg(not(windows))]
pub fn load_library(name: &str) -> Result<LibraryHandle, LoaderError> {
    Err(crate::error::StringError::new(format!(
        "{name} can only be loaded on Windows"
    )))
}

/// Look up an export by ordinal and type it as the boost entry point
///
/// # Safety
///
/// The export must really have the [`DwmpSdrToHdrBoostFn`] signature. The
/// loader cannot check this; a wrong ordinal yields a callable that does
/// something else entirely.
#[cfg(windows)]
#[expect(
    unsafe_code,
    reason = "Required for Windows FFI to call GetProcAddress and type the result"
)]
pub unsafe fn resolve_ordinal(
    library: LibraryHandle,
    ordinal: u16,
) -> Option<DwmpSdrToHdrBoostFn> {
    use windows::Win32::Foundation::HMODULE;
    use windows::Win32::System::LibraryLoader::GetProcAddress;
    use windows::core::PCSTR;

    let module = HMODULE(library.raw() as *mut c_void);
    // SAFETY: `module` came from LoadLibraryW and is never freed.
    let address = unsafe { GetProcAddress(module, PCSTR(ordinal_as_name(ordinal))) }?;

    // SAFETY: both are plain function pointers; the signature is the
    // caller's promise.
    Some(unsafe {
        std::mem::transmute::<unsafe extern "system" fn() -> isize, DwmpSdrToHdrBoostFn>(address)
    })
}

/// Stub implementation for non-Windows platforms
///
/// # Safety
///
/// This is a stub function that always returns `None`. It does not access any memory.
#[cfg(not(windows))]
#[expect(
    unsafe_code,
    reason = "Keeps the same unsafe signature as the Windows implementation"
)]
pub unsafe fn resolve_ordinal(
    _library: LibraryHandle,
    _ordinal: u16,
) -> Option<DwmpSdrToHdrBoostFn> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_encoding_fits_low_word() {
        let encoded = ordinal_as_name(SDR_TO_HDR_BOOST_ORDINAL) as usize;
        assert_eq!(encoded, 171);
        assert_eq!(encoded >> 16, 0, "high word must be zero for ordinal lookups");
        assert_eq!(ordinal_as_name(u16::MAX) as usize, 0xFFFF);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DWMAPI_LIBRARY, "dwmapi.dll");
        assert_eq!(SDR_TO_HDR_BOOST_ORDINAL, 171);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_load_library_fails_off_windows() {
        let err = load_library(DWMAPI_LIBRARY).unwrap_err();
        assert!(err.to_string().contains("dwmapi.dll"));
    }

    #[test]
    #[cfg(windows)]
    fn test_missing_library_fails_to_load() {
        assert!(load_library("sdrboost-no-such-library.dll").is_err());
    }

    #[test]
    #[cfg(windows)]
    #[expect(unsafe_code, reason = "Exercises the ordinal lookup against a system DLL")]
    fn test_unused_ordinal_is_not_resolved() {
        let kernel32 = load_library("kernel32.dll").unwrap();
        assert!(unsafe { resolve_ordinal(kernel32, u16::MAX) }.is_none());
    }
}
