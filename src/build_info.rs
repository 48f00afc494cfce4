//! Compile-time build stamp, generated by `build.rs` into `OUT_DIR`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Human-readable stamp for the `--version` flag.
pub fn version_string() -> String {
    format!("{} ({})", BUILD_DATE, BUILD_COMMIT)
}
