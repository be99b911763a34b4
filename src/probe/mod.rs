//! The runtime probe.
//!
//! - [`runtime`]: dynamic loading and symbol invocation
//! - [`version`]: packed version decoding

pub mod runtime;
pub mod version;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use self::runtime::{RuntimeLibrary, DRIVER_VERSION_SYMBOL, INIT_SYMBOL, RUNTIME_VERSION_SYMBOL};
use self::version::RuntimeVersion;

/// Outcome of a successful probe.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    /// Library the probe ran against.
    pub library_path: String,

    /// Raw packed runtime version as written by the runtime.
    pub runtime_version: i32,

    /// Decoded runtime version.
    pub runtime: RuntimeVersion,

    /// Raw packed driver version, when queried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_version: Option<i32>,

    /// Whether hipInit was called and succeeded. `None` when init was not
    /// requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialized: Option<bool>,
}

/// Run the probe: load the library, optionally initialize the runtime, query
/// the version(s), and release the handle.
///
/// The handle is released exactly once on every path after a successful open.
/// Early-error paths release through the handle's drop; the success path
/// releases explicitly so an unload failure is observable as
/// [`ProbeError::Unload`]. That variant carries the already-established
/// report, so a release failure never discards the version result.
pub fn run(config: &ProbeConfig) -> Result<ProbeReport, ProbeError> {
    let lib = RuntimeLibrary::open(&config.library_path)?;
    info!(path = %config.library_path.display(), "runtime library loaded");

    let initialized = if config.call_init {
        Some(initialize(&lib, config.ignore_init_failure)?)
    } else {
        None
    };

    let runtime_version = lib.query_version(RUNTIME_VERSION_SYMBOL)?;
    let runtime = RuntimeVersion::from_packed(runtime_version);
    info!(
        raw = runtime_version,
        major = runtime.major,
        minor = runtime.minor,
        patch = runtime.patch,
        "runtime version"
    );

    let driver_version = if config.query_driver {
        let v = lib.query_version(DRIVER_VERSION_SYMBOL)?;
        info!(raw = v, "driver version");
        Some(v)
    } else {
        None
    };

    let report = ProbeReport {
        library_path: config.library_path.display().to_string(),
        runtime_version,
        runtime,
        driver_version,
        initialized,
    };

    // The report is established before release; a failed release is a
    // distinct fault and must not discard it.
    match lib.close() {
        Ok(()) => Ok(report),
        Err(e) => Err(ProbeError::Unload {
            reason: e.to_string(),
            report: Box::new(report),
        }),
    }
}

/// Call the runtime initialization function.
///
/// Failure policy: with `ignore_failure` set, a missing symbol or a nonzero
/// status is logged and probing continues, so the probe still runs on hosts
/// without an accelerator device present.
fn initialize(lib: &RuntimeLibrary, ignore_failure: bool) -> Result<bool, ProbeError> {
    match lib.call_init() {
        Ok(()) => Ok(true),
        Err(err) if ignore_failure => {
            warn!(%err, "{INIT_SYMBOL} failed, continuing without a device");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
