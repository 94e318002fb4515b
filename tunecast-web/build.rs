//! Build script for tunecast-web
//!
//! Exports `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` to the crate so
//! the startup log line and `/health` can name the running build.
//!
//! No `rerun-if-changed` directives are emitted: with none, Cargo reruns the
//! script whenever the package changes, which keeps the timestamp current.

use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    export("GIT_HASH", &short_commit().unwrap_or_else(|| UNKNOWN.to_string()));
    export(
        "BUILD_TIMESTAMP",
        &chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
    );
    export("BUILD_PROFILE", &env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()));
}

/// Short hash of HEAD, `None` outside a git checkout
fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn export(key: &str, value: &str) {
    println!("cargo:rustc-env={}={}", key, value);
}
