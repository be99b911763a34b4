//! probe: HIP runtime smoke test.
//!
//! Loads the shared library named on the command line, resolves the runtime
//! version query, invokes it, and reports the result. Exit codes distinguish
//! failure classes: 0 = success, 1 = usage/load/symbol resolution, 2 = the
//! runtime call reported a nonzero status, 3 = unload failure.
//!
//! Canonical diagnostics (the `HIP VERSION:` line and `ERROR:` lines) go to
//! standard error as plain text so scripted callers see them regardless of the
//! log filter; structured logging rides alongside via tracing.

use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info, warn};

use hip_probe::config::{Cli, ProbeConfig};
use hip_probe::error::ProbeError;
use hip_probe::probe::ProbeReport;

fn main() {
    let cli = parse_cli();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "hip_probe=debug,probe=debug"
    } else {
        "hip_probe=info,probe=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(true)
        // Single consistent diagnostic channel: everything but the JSON
        // report goes to stderr.
        .with_writer(std::io::stderr)
        .init();

    info!("hip-probe v{}", env!("CARGO_PKG_VERSION"));

    let config = ProbeConfig::from_cli(&cli);

    match hip_probe::run(&config) {
        Ok(report) => print_report(&report, cli.json),
        Err(err) => {
            error!(%err, "probe failed");
            // An unload failure is reported after the version line: the
            // success determination of the call itself is already
            // established.
            if let ProbeError::Unload { report, .. } = &err {
                print_report(report, cli.json);
            }
            match &err {
                ProbeError::Usage => eprintln!("{err}"),
                other => eprintln!("ERROR: {other}"),
            }
            process::exit(err.exit_code());
        }
    }
}

/// Emit the canonical version line(s) on stderr, and the JSON report on
/// stdout when requested.
fn print_report(report: &ProbeReport, json: bool) {
    eprintln!("HIP VERSION: {:x}", report.runtime_version);
    if let Some(driver) = report.driver_version {
        eprintln!("HIP DRIVER VERSION: {driver:x}");
    }
    if json {
        match serde_json::to_string(report) {
            Ok(body) => println!("{body}"),
            Err(err) => warn!(%err, "failed to serialize report"),
        }
    }
}

/// Parse CLI arguments, keeping the documented usage contract:
/// argument-count violations (missing or unexpected arguments) print the
/// usage line and exit 1 (clap's default would exit 2). Other clap errors
/// keep their own diagnostics but still exit 1; `--help` and `--version`
/// behave normally.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                process::exit(0);
            }
            ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument => {
                let usage = ProbeError::Usage;
                eprintln!("{usage}");
                process::exit(usage.exit_code());
            }
            _ => {
                let _ = err.print();
                process::exit(ProbeError::Usage.exit_code());
            }
        },
    }
}
