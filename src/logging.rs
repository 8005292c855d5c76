//! Diagnostic logging on stderr. Stdout carries command output only.

use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity setting.
///
/// `quiet` keeps errors only; otherwise each `-v` raises the level one step
/// from `warn`.
pub fn default_filter(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity flags
/// when it is set. Calling this twice is harmless.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::new(default_filter(verbosity, quiet)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
