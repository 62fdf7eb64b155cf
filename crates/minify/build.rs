//! Build script for minify
//!
//! Captures the current commit hash so the health endpoint can report a
//! release id without shelling out at runtime.

use std::process::Command;

fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo::rustc-env=MINIFY_COMMIT_HASH={hash}");
    println!("cargo::rerun-if-changed=../../.git/HEAD");
}
