//! Diagnostics via `tracing`, written to stderr.
//!
//! Program output (answers, tables) goes to stdout and is unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `info`, or `warn` in quiet mode.
///
/// # Example
/// ```bash
/// RUST_LOG=aoc_http_client=debug aoc init --day 3
/// ```
pub fn init(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
