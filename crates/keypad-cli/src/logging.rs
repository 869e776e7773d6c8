//! Log subscriber setup
//!
//! Logs go to stderr so stdout carries only results.

use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, Verbosity};

/// Builds the log filter.
///
/// Quiet mode always filters to errors; otherwise `RUST_LOG` wins over the
/// verbosity level when set.
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    if verbosity.is_quiet() {
        return EnvFilter::new(verbosity.filter_directive());
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Installs the global subscriber. JSON output gets JSON log lines.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbosity: Verbosity, format: OutputFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false);

    // an already-installed subscriber keeps precedence
    let _ = match format {
        OutputFormat::Json => builder.json().try_init(),
        OutputFormat::Text => builder.try_init(),
    };
}
