//! Build script for hip-probe.
//!
//! Compiles the C stub runtimes under `tests/stubs/` into shared objects in
//! `OUT_DIR` so the integration tests can exercise the probe against libraries
//! with known behavior (good version, failing call, missing symbol, failing
//! init) without a ROCm install present.

use std::env;
use std::path::PathBuf;
use std::process::Command;

const STUBS: &[&str] = &[
    "hip_stub_ok",
    "hip_stub_badcall",
    "hip_stub_nosym",
    "hip_stub_initfail",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Stub shared objects are only buildable with -shared/-fPIC semantics.
    let family = env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    if family != "unix" {
        println!("cargo:warning=skipping test stub libraries on non-unix target");
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let compiler = cc::Build::new().get_compiler();

    for stub in STUBS {
        let src = PathBuf::from("tests/stubs").join(format!("{stub}.c"));
        let dst = out_dir.join(format!("lib{stub}.so"));

        let mut cmd: Command = compiler.to_command();
        cmd.arg("-shared")
            .arg("-fPIC")
            .arg(&src)
            .arg("-o")
            .arg(&dst);

        let status = cmd
            .status()
            .unwrap_or_else(|e| panic!("failed to spawn compiler for {stub}: {e}"));
        if !status.success() {
            panic!("compiling stub {} failed: {status}", src.display());
        }

        println!("cargo:rerun-if-changed={}", src.display());
    }
}
