//! Structured logging using **tracing**.
//!
//! Events go to stderr as JSON, one object per line; stdout stays reserved for
//! the run summary a build system may capture. Without `RUST_LOG` the core
//! logs at info, which covers every discovered definition and collision.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "dridefs_core=info";

/// Builds the event filter from a `RUST_LOG`-style directive string.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes the global tracing subscriber.
///
/// Call once at startup. A second call is a no-op.
///
/// # Environment Variables
/// - `RUST_LOG`: overrides [`DEFAULT_FILTER`] (e.g. `RUST_LOG=dridefs_core=debug`
///   to also see every scanned file)
pub fn init_structured_logging() {
    let directives = std::env::var("RUST_LOG").ok();

    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_env_filter(build_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}

/// Logs an error event.
pub fn log_error(message: &str) {
    error!(detail = %message);
}
