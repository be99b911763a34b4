//! Probe error taxonomy.
//!
//! Every variant is terminal (nothing is retried) and each maps to a distinct
//! process exit code so a test harness can classify failures without parsing
//! diagnostic text.

use std::path::PathBuf;

use thiserror::Error;

use crate::probe::ProbeReport;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// Argument-count violation on the command line.
    #[error("Syntax error: Expected library path")]
    Usage,

    /// The shared library could not be mapped into the process.
    #[error("Could not load library {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// The expected exported function is absent from the library.
    #[error("Could not resolve symbol {0}")]
    SymbolNotFound(String),

    /// The resolved function ran but reported a nonzero status.
    #[error("{symbol} returned {status}")]
    RuntimeCall { symbol: String, status: i32 },

    /// Releasing the library handle failed. Carries the report already
    /// established by the successful call: the version is still surfaced
    /// before the unload diagnostic.
    #[error("unload(): {reason}")]
    Unload {
        reason: String,
        report: Box<ProbeReport>,
    },
}

impl ProbeError {
    /// Process exit code for this failure class.
    ///
    /// 1 = usage / load / symbol resolution, 2 = runtime call reported a
    /// nonzero status, 3 = unload failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::Usage | ProbeError::Load { .. } | ProbeError::SymbolNotFound(_) => 1,
            ProbeError::RuntimeCall { .. } => 2,
            ProbeError::Unload { .. } => 3,
        }
    }
}
