//! Generates the build stamp included by `src/build_info.rs`.

use std::path::PathBuf;
use std::process::Command;
use std::{env, fs};

fn git_commit() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let hash = String::from_utf8(out.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    // CI overrides via env vars; local builds fall back to git and today
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(git_commit)
        .unwrap_or_else(|| "dev".to_string());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let stamp = format!(
        "pub const BUILD_COMMIT: &str = \"{commit}\";\npub const BUILD_DATE: &str = \"{date}\";\n"
    );
    let dest =
        PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo")).join("build_info.rs");
    fs::write(dest, stamp).expect("write build stamp");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
