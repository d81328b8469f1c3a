// Logging module for structured logging using the tracing crate

use std::error::Error;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the tracing subscriber for structured logging
///
/// Events are written to stdout as one JSON object per line, which the
/// function runtime forwards to its log stream. The level comes from
/// `RUST_LOG` and defaults to `info`.
///
/// Calling this more than once is harmless: if a global subscriber is
/// already installed the existing one is kept and `Ok(())` is returned.
///
/// # Examples
///
/// ```
/// use serverless_filter_bot::logging::init_subscriber;
///
/// init_subscriber().expect("Failed to initialize logging");
/// tracing::info!("Function started");
/// ```
pub fn init_subscriber() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());

    let fmt_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_ansi(false)
        .with_target(false)
        .without_time();

    // A second init in the same process finds the global default taken
    if Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already initialized");
    }

    Ok(())
}

/// Build the level filter from a directive string, falling back to `info`.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
