/*!
 * Tracing Setup
 * Subscriber initialization for sink growth and configuration events
 *
 * Sink internals emit through the `tracing` macros only; nothing is printed
 * unless the host installs a subscriber, either its own or the one below.
 */

use crate::core::limits::ENV_TRACE_JSON;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global subscriber, ignoring an already installed one
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - STRINGSINK_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    // A host that already installed a subscriber keeps it
    let _ = try_init_tracing();
}

/// Install a global subscriber, reporting whether one was already set
pub fn try_init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = json_requested(std::env::var(ENV_TRACE_JSON).ok().as_deref());
    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true),
            )
            .try_init()?;
        info!("Sink tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init()?;
        info!("Sink tracing initialized");
    }
    Ok(())
}

fn json_requested(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}
