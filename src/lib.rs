//! hip-probe: smoke-test probe for a HIP GPU compute runtime.
//!
//! Loads a caller-supplied shared library, resolves the runtime version query
//! (`hipRuntimeGetVersion`) by name, invokes it, and reports the result. The
//! probe works without a physical accelerator present; it only requires the
//! runtime library itself to be loadable.
//!
//! Control flow is strictly linear:
//!   resolve library → (optional init) → resolve symbol → invoke → interpret →
//!   release → exit.
//!
//! Every failure is terminal and maps one-to-one to a process exit code, so
//! scripted callers can distinguish failure classes by exit code alone.

pub mod config;
pub mod error;
pub mod probe;

pub use config::ProbeConfig;
pub use error::ProbeError;
pub use probe::{run, ProbeReport};
