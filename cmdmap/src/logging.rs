//! Diagnostic tracing for the registry and dispatcher.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Registration, dispatch, and discovery
//!   diagnostics, output to stderr.
//!
//! - **Console replies (`io/console`)**: Messages addressed to whoever typed
//!   the command. Printed to stdout, unaffected by the log filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "CMDMAP_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

/// Initialize the tracing subscriber.
///
/// Filter directives come from `CMDMAP_LOG`, then `RUST_LOG`, then `warn`.
/// Output: stderr, compact format, without module targets.
///
/// # Example
/// ```bash
/// CMDMAP_LOG=cmdmap::registry=debug cmdmap console
/// ```
pub fn init() {
    let directives = select_directives(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    let filter =
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// First non-blank source wins.
fn select_directives(cmdmap_log: Option<String>, rust_log: Option<String>) -> String {
    [cmdmap_log, rust_log]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}
