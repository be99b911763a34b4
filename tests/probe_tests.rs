//! Integration tests for the probe library API against compiled stub runtimes.
//!
//! The stubs under `tests/stubs/` are compiled into `OUT_DIR` by build.rs.

#![cfg(unix)]

use std::io::Write;
use std::path::{Path, PathBuf};

use hip_probe::config::ProbeConfig;
use hip_probe::error::ProbeError;
use hip_probe::probe::version::RuntimeVersion;

fn stub_path(name: &str) -> PathBuf {
    Path::new(env!("OUT_DIR")).join(format!("lib{name}.so"))
}

#[test]
fn test_probe_reports_stub_version() {
    let config = ProbeConfig::for_library(stub_path("hip_stub_ok"));
    let report = hip_probe::run(&config).unwrap();

    assert_eq!(report.runtime_version, 0x40200);
    assert_eq!(report.driver_version, None);
    assert_eq!(report.initialized, None);
}

#[test]
fn test_probe_missing_library() {
    let config = ProbeConfig::for_library("/nonexistent/libamdhip64.so");
    let err = hip_probe::run(&config).unwrap_err();

    assert!(matches!(err, ProbeError::Load { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_probe_not_a_library() {
    // A regular file that is not a shared object must fail to load.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"definitely not an ELF shared object").unwrap();

    let config = ProbeConfig::for_library(file.path());
    let err = hip_probe::run(&config).unwrap_err();

    assert!(matches!(err, ProbeError::Load { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_probe_symbol_missing() {
    let config = ProbeConfig::for_library(stub_path("hip_stub_nosym"));
    let err = hip_probe::run(&config).unwrap_err();

    match err {
        ProbeError::SymbolNotFound(ref symbol) => {
            assert_eq!(symbol, "hipRuntimeGetVersion");
        }
        ref other => panic!("expected SymbolNotFound, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_probe_call_failure_carries_status() {
    let config = ProbeConfig::for_library(stub_path("hip_stub_badcall"));
    let err = hip_probe::run(&config).unwrap_err();

    match err {
        ProbeError::RuntimeCall { ref symbol, status } => {
            assert_eq!(symbol, "hipRuntimeGetVersion");
            assert_eq!(status, 5);
        }
        ref other => panic!("expected RuntimeCall, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_init_failure_ignored_by_default() {
    let config = ProbeConfig {
        call_init: true,
        ..ProbeConfig::for_library(stub_path("hip_stub_initfail"))
    };
    let report = hip_probe::run(&config).unwrap();

    // Init failed but was ignored; the version query still succeeds.
    assert_eq!(report.initialized, Some(false));
    assert_eq!(report.runtime_version, 0x40200);
}

#[test]
fn test_init_failure_fatal_when_strict() {
    let config = ProbeConfig {
        call_init: true,
        ignore_init_failure: false,
        ..ProbeConfig::for_library(stub_path("hip_stub_initfail"))
    };
    let err = hip_probe::run(&config).unwrap_err();

    match err {
        ProbeError::RuntimeCall { ref symbol, status } => {
            assert_eq!(symbol, "hipInit");
            assert_eq!(status, 3);
        }
        ref other => panic!("expected RuntimeCall, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_init_success_recorded() {
    let config = ProbeConfig {
        call_init: true,
        ..ProbeConfig::for_library(stub_path("hip_stub_ok"))
    };
    let report = hip_probe::run(&config).unwrap();

    assert_eq!(report.initialized, Some(true));
}

#[test]
fn test_driver_version_query() {
    let config = ProbeConfig {
        query_driver: true,
        ..ProbeConfig::for_library(stub_path("hip_stub_ok"))
    };
    let report = hip_probe::run(&config).unwrap();

    assert_eq!(report.driver_version, Some(60_000_000));
    assert_eq!(
        RuntimeVersion::from_packed(report.driver_version.unwrap()),
        RuntimeVersion {
            major: 6,
            minor: 0,
            patch: 0
        }
    );
}

#[test]
fn test_report_serializes_to_json() {
    let config = ProbeConfig::for_library(stub_path("hip_stub_ok"));
    let report = hip_probe::run(&config).unwrap();

    let body = serde_json::to_string(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(value["runtime_version"], 0x40200);
    // Fields for unrequested queries are omitted entirely.
    assert!(value.get("driver_version").is_none());
    assert!(value.get("initialized").is_none());
}
