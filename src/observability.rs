//! Tracing/logging initialization.
//!
//! Logs go to stderr so stdout stays reserved for the cashout report.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: rejected operations and
/// storage warnings only.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.with_ansi(std::io::stderr().is_terminal()).try_init()
    };
}
