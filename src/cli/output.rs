//! Console output helpers honoring the global `--json` / `--quiet` flags.
//!
//! The flags are propagated via environment variables set once at startup so
//! every module can check them without threading state through call sites.

/// Whether machine-readable JSON output was requested.
pub fn is_json() -> bool {
    std::env::var("PARKFETCH_JSON").is_ok()
}

/// Whether non-essential output is suppressed.
pub fn is_quiet() -> bool {
    std::env::var("PARKFETCH_QUIET").is_ok()
}

/// Print a value as pretty JSON to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}
