//! Probe configuration.
//!
//! All knobs come from the command line; the probe consumes no environment
//! variables and no config files.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "probe", about = "HIP runtime smoke-test probe")]
pub struct Cli {
    /// Path to the HIP runtime shared library (e.g. libamdhip64.so).
    pub library_path: PathBuf,

    /// Call hipInit(0) before querying the version.
    #[arg(long)]
    pub init: bool,

    /// Treat an initialization failure as fatal instead of a warning.
    ///
    /// By default init failures are ignored so the probe can run on hosts
    /// without an accelerator device.
    #[arg(long, requires = "init")]
    pub strict_init: bool,

    /// Also query the driver version (hipDriverGetVersion).
    #[arg(long)]
    pub driver: bool,

    /// Emit a JSON report on standard output after a successful probe.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Path to the shared library under test.
    pub library_path: PathBuf,

    /// Whether to call the runtime initialization function first.
    pub call_init: bool,

    /// Continue past a failed (or unresolvable) initialization call.
    pub ignore_init_failure: bool,

    /// Whether to additionally query the driver version.
    pub query_driver: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::new(),
            call_init: false,
            ignore_init_failure: true,
            query_driver: false,
        }
    }
}

impl ProbeConfig {
    /// Build the probe settings from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            library_path: cli.library_path.clone(),
            call_init: cli.init,
            ignore_init_failure: !cli.strict_init,
            query_driver: cli.driver,
        }
    }

    /// Convenience constructor for the common case: probe one library with
    /// default policies.
    pub fn for_library(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: path.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ProbeConfig::default();
        assert!(!cfg.call_init);
        assert!(cfg.ignore_init_failure);
        assert!(!cfg.query_driver);
    }

    #[test]
    fn test_from_cli_strict_init() {
        let cli = Cli {
            library_path: PathBuf::from("libamdhip64.so"),
            init: true,
            strict_init: true,
            driver: false,
            json: false,
            verbose: false,
        };
        let cfg = ProbeConfig::from_cli(&cli);
        assert!(cfg.call_init);
        assert!(!cfg.ignore_init_failure);
    }
}
