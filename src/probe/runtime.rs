//! Dynamic loading and invocation of the runtime library.
//!
//! The library is opened in immediate-binding mode; unresolved dependencies
//! surface at load time rather than at first call. Symbols are resolved by
//! name against the open handle and are only valid while it stays open.

use std::ffi::{c_int, c_uint};
use std::path::Path;

use libloading::Library;
use tracing::debug;

use crate::error::ProbeError;

/// Version query exported by the HIP runtime: writes a packed version integer
/// and returns a zero status on success.
pub const RUNTIME_VERSION_SYMBOL: &str = "hipRuntimeGetVersion";

/// Driver-side version query with the same contract.
pub const DRIVER_VERSION_SYMBOL: &str = "hipDriverGetVersion";

/// Runtime initialization entry point.
pub const INIT_SYMBOL: &str = "hipInit";

/// `int f(int* out_version)`, the version query contract.
type VersionFn = unsafe extern "C" fn(*mut c_int) -> c_int;

/// `int hipInit(unsigned int flags)`.
type InitFn = unsafe extern "C" fn(c_uint) -> c_int;

/// Exclusively-owned handle to the loaded runtime library.
///
/// Dropping the handle releases the library, so every early-error path in the
/// probe releases exactly once without explicit cleanup. The success path
/// should call [`RuntimeLibrary::close`] instead, which reports a release
/// failure rather than discarding it.
#[derive(Debug)]
pub struct RuntimeLibrary {
    inner: Library,
}

impl RuntimeLibrary {
    /// Map the shared library at `path` into the process.
    ///
    /// This may run library-level constructors.
    pub fn open(path: &Path) -> Result<Self, ProbeError> {
        debug!(path = %path.display(), "opening runtime library");
        let inner = unsafe { Library::new(path) }.map_err(|e| ProbeError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { inner })
    }

    /// Resolve `symbol` and invoke it with a pointer to a local integer.
    ///
    /// Returns the version value the function wrote, or the nonzero status it
    /// reported.
    pub fn query_version(&self, symbol: &str) -> Result<i32, ProbeError> {
        let func = unsafe { self.inner.get::<VersionFn>(symbol.as_bytes()) }
            .map_err(|_| ProbeError::SymbolNotFound(symbol.to_string()))?;

        let mut version: c_int = -1;
        let status = unsafe { func(&mut version) };
        if status != 0 {
            return Err(ProbeError::RuntimeCall {
                symbol: symbol.to_string(),
                status,
            });
        }
        Ok(version)
    }

    /// Resolve and call `hipInit(0)`.
    pub fn call_init(&self) -> Result<(), ProbeError> {
        let func = unsafe { self.inner.get::<InitFn>(INIT_SYMBOL.as_bytes()) }
            .map_err(|_| ProbeError::SymbolNotFound(INIT_SYMBOL.to_string()))?;

        let status = unsafe { func(0) };
        if status != 0 {
            return Err(ProbeError::RuntimeCall {
                symbol: INIT_SYMBOL.to_string(),
                status,
            });
        }
        Ok(())
    }

    /// Release the library handle, surfacing a failure instead of swallowing
    /// it the way a plain drop would.
    pub fn close(self) -> Result<(), libloading::Error> {
        self.inner.close()
    }
}
