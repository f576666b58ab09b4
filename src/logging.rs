//! Diagnostic logging.
//!
//! Progress and summaries are printed to stdout by the command handlers;
//! `tracing` events carry the extra detail and go to stderr, filtered by
//! `RUST_LOG` (default: warnings from this crate only).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "sales_etl=warn";

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
