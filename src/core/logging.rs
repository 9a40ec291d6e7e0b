//! Logging initialization
//!
//! Sets up the tracing subscriber for structured logging. RUST_LOG, when
//! set, overrides the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system with the specified level
///
/// Unknown levels fall back to "info".
pub fn init_logging(log_level: &str) {
    let requested = log_level.trim().to_lowercase();

    let effective = match requested.as_str() {
        "debug" | "info" | "warn" | "error" | "trace" => requested.as_str(),
        "warning" => "warn",
        "critical" => "error",
        _ => "info",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
