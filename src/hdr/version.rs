//! Windows version detection
//!
//! The boost ordinal is tied to the Windows build. The build is logged next
//! to the ordinal so a broken run can be matched to the OS that broke it.

use crate::error::Result;

/// First Windows 11 build
const WINDOWS_11_BUILD: u32 = 22000;

/// First Windows 11 24H2 build
const WINDOWS_11_24H2_BUILD: u32 = 26100;

/// Windows version enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsVersion {
    /// Windows 10
    Windows10,
    /// Windows 11 (before 24H2)
    Windows11,
    /// Windows 11 24H2 or later (build 26100+)
    Windows11_24H2,
}

impl WindowsVersion {
    /// Detect the current Windows version
    ///
    /// Fails wherever [`WindowsVersion::get_build_number`] fails, including
    /// every non-Windows platform.
    pub fn detect() -> Result<Self> {
        Self::get_build_number().map(Self::parse_build_number)
    }

    /// Classify a build number
    pub fn parse_build_number(build: u32) -> Self {
        if build >= WINDOWS_11_24H2_BUILD {
            Self::Windows11_24H2
        } else if build >= WINDOWS_11_BUILD {
            Self::Windows11
        } else {
            Self::Windows10
        }
    }

    /// Gets the Windows build number using `RtlGetVersion`.
    ///
    /// `GetVersionEx` lies to unmanifested processes; `RtlGetVersion` does not.
    ///
    /// # Safety
    ///
    /// Sound FFI call: ntdll.dll and `RtlGetVersion` guaranteed present on Windows;
    /// function pointer validated before transmute; structure correctly sized with
    /// `dwOSVersionInfoSize`; return status checked before data access.
    #[cfg(windows)]
    #[expect(
        unsafe_code,
        reason = "Required for Windows FFI to call RtlGetVersion from ntdll.dll"
    )]
    pub fn get_build_number() -> Result<u32> {
        use crate::error::{SdrBoostError, StringError};
        use std::mem::{size_of, transmute};
        use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
        use windows::Win32::System::SystemInformation::OSVERSIONINFOEXW;
        use windows::core::HSTRING;

        type RtlGetVersionFn = unsafe extern "system" fn(*mut OSVERSIONINFOEXW) -> i32;

        unsafe {
            let ntdll = LoadLibraryW(&HSTRING::from("ntdll.dll"))?;

            let Some(rtl_get_version_ptr) =
                GetProcAddress(ntdll, windows::core::s!("RtlGetVersion"))
            else {
                return Err(SdrBoostError::ConfigError(StringError::new(
                    "RtlGetVersion not found in ntdll.dll",
                )));
            };

            let rtl_get_version: RtlGetVersionFn = transmute(rtl_get_version_ptr);

            #[expect(
                clippy::cast_possible_truncation,
                reason = "size_of::<OSVERSIONINFOEXW>() is a compile-time constant that fits in u32"
            )]
            let mut version_info = OSVERSIONINFOEXW {
                dwOSVersionInfoSize: size_of::<OSVERSIONINFOEXW>() as u32,
                ..Default::default()
            };

            let status = rtl_get_version(&raw mut version_info);
            if status != 0 {
                return Err(SdrBoostError::ConfigError(StringError::new(format!(
                    "RtlGetVersion failed with status: {status}"
                ))));
            }

            Ok(version_info.dwBuildNumber)
        }
    }

    /// Non-Windows platforms have no build number
    #[cfg(not(windows))]
    pub fn get_build_number() -> Result<u32> {
        Err(crate::error::SdrBoostError::ConfigError(
            crate::error::StringError::new("Windows build number is only available on Windows"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(windows)]
    fn test_version_detection() {
        let version = WindowsVersion::detect();
        assert!(version.is_ok());
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(
            WindowsVersion::parse_build_number(WINDOWS_11_BUILD - 1),
            WindowsVersion::Windows10
        );
        assert_eq!(
            WindowsVersion::parse_build_number(WINDOWS_11_BUILD),
            WindowsVersion::Windows11
        );
        assert_eq!(
            WindowsVersion::parse_build_number(WINDOWS_11_24H2_BUILD),
            WindowsVersion::Windows11_24H2
        );
    }

    #[test]
    #[cfg(not(windows))]
    fn test_build_number_unavailable_off_windows() {
        assert!(WindowsVersion::get_build_number().is_err());
        assert!(WindowsVersion::detect().is_err());
    }
}
