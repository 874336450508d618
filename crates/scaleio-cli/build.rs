//! Build script: stamps `SIO_VERSION` into the binary.
//!
//! Packagers can set `SIO_BUILD_VERSION`; otherwise `git describe` is used,
//! falling back to the crate version outside a checkout.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=SIO_BUILD_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = std::env::var("SIO_BUILD_VERSION")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=SIO_VERSION={version}");
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim().trim_start_matches('v');
    (!described.is_empty()).then(|| described.to_string())
}
