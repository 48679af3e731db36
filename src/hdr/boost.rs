//! Compositor boost invoker
//!
//! Loads the compositor library, resolves the boost export by ordinal and
//! calls it per monitor. Resolution happens once per run; the resulting
//! [`BoostFunction`] is reused for every monitor.

use crate::brightness::BrightnessLevel;
use crate::config::BoostConfig;
use crate::error::{Result, SdrBoostError};
use crate::hdr::windows_api::{self, DwmpSdrToHdrBoostFn, LibraryHandle};
use crate::monitor::MonitorHandle;
use std::ffi::c_void;
use tracing::{debug, info, warn};

/// Applies a brightness level to one monitor
///
/// Fire-and-forget: the entry point reports nothing back, so callers must
/// not expect to learn whether a call took effect.
pub trait BoostTarget {
    /// Apply `level` to `monitor`
    fn apply(&self, monitor: MonitorHandle, level: BrightnessLevel);
}

impl<T: BoostTarget + ?Sized> BoostTarget for &T {
    fn apply(&self, monitor: MonitorHandle, level: BrightnessLevel) {
        (**self).apply(monitor, level);
    }
}

/// Outcome of probing for the boost entry point
#[derive(Debug)]
pub enum BoostCapability<F = BoostFunction> {
    /// Library loaded and the ordinal resolved
    Resolved(F),
    /// The library could not be loaded
    LibraryMissing {
        /// Library file name
        library: String,
        /// Loader error
        source: windows_api::LoaderError,
    },
    /// The library loaded but the ordinal is not exported
    SymbolMissing {
        /// Library file name
        library: String,
        /// Ordinal that was requested
        ordinal: u16,
    },
}

impl<F> BoostCapability<F> {
    /// Whether the library itself was loaded
    pub fn library_loaded(&self) -> bool {
        !matches!(self, Self::LibraryMissing { .. })
    }

    /// Turn the probe outcome into the callable or a fatal error
    pub fn into_result(self) -> Result<F> {
        match self {
            Self::Resolved(function) => Ok(function),
            Self::LibraryMissing { library, source } => {
                Err(SdrBoostError::LibraryLoad { library, source })
            }
            Self::SymbolMissing { library, ordinal } => {
                Err(SdrBoostError::SymbolResolution { library, ordinal })
            }
        }
    }
}

/// The resolved boost entry point
///
/// Only valid while the library stays loaded, which is the rest of the
/// process lifetime. Deliberately not `Clone`: one resolution per run.
pub struct BoostFunction {
    function: DwmpSdrToHdrBoostFn,
    library: Option<LibraryHandle>,
    ordinal: u16,
}

impl BoostFunction {
    /// Wrap an already typed entry point
    ///
    /// # Safety
    ///
    /// `function` must accept `(HMONITOR, f64)` with the system calling
    /// convention and stay callable for the lifetime of the returned value.
    #[expect(unsafe_code, reason = "Constructs a callable from a raw entry point")]
    pub unsafe fn from_raw(function: DwmpSdrToHdrBoostFn, ordinal: u16) -> Self {
        Self {
            function,
            library: None,
            ordinal,
        }
    }

    /// Export ordinal this function was resolved from
    pub fn ordinal(&self) -> u16 {
        self.ordinal
    }

    /// Module handle of the library the function lives in, if loaded here
    pub fn library(&self) -> Option<LibraryHandle> {
        self.library
    }
}

impl std::fmt::Debug for BoostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoostFunction")
            .field("address", &(self.function as *const c_void))
            .field("library", &self.library)
            .field("ordinal", &self.ordinal)
            .finish()
    }
}

impl BoostTarget for BoostFunction {
    /// Call the private compositor export
    ///
    /// Nothing here can be validated. A changed signature or ordinal in a
    /// future Windows build may make this call do nothing, corrupt state or
    /// crash the process. There is no retry.
    #[expect(unsafe_code, reason = "Calls the undocumented compositor export")]
    fn apply(&self, monitor: MonitorHandle, level: BrightnessLevel) {
        debug!(
            "Calling ordinal {} for monitor {} with {}",
            self.ordinal, monitor, level
        );
        // SAFETY: the signature is the `from_raw`/probe contract; the monitor
        // handle's validity is the OS's concern.
        unsafe { (self.function)(monitor.raw() as *mut c_void, level.value()) }
    }
}

/// Load the configured library and look up the boost ordinal
///
/// The library is never unloaded.
#[expect(unsafe_code, reason = "Types the ordinal export as the boost entry point")]
pub fn probe_boost_function(config: &BoostConfig) -> BoostCapability {
    let library = match windows_api::load_library(&config.library) {
        Ok(library) => library,
        Err(source) => {
            warn!("Failed to load {}: {}", config.library, source);
            return BoostCapability::LibraryMissing {
                library: config.library.clone(),
                source,
            };
        }
    };
    debug!("Loaded {} at {:#x}", config.library, library.raw());

    // SAFETY: the configured ordinal is trusted to be DwmpSDRToHDRBoost.
    match unsafe { windows_api::resolve_ordinal(library, config.ordinal) } {
        Some(function) => {
            info!(
                "Resolved ordinal {} in {}",
                config.ordinal, config.library
            );
            BoostCapability::Resolved(BoostFunction {
                function,
                library: Some(library),
                ordinal: config.ordinal,
            })
        }
        None => {
            warn!(
                "{} loaded but ordinal {} is not exported",
                config.library, config.ordinal
            );
            BoostCapability::SymbolMissing {
                library: config.library.clone(),
                ordinal: config.ordinal,
            }
        }
    }
}

/// Resolve the boost entry point or fail the run
pub fn acquire_boost_function(config: &BoostConfig) -> Result<BoostFunction> {
    probe_boost_function(config).into_result()
}
