//! Subscriber bootstrap for applications embedding `rtimespan`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const FALLBACK_LEVEL: &str = "debug";

/// ## Summary
/// Builds the `EnvFilter` for a configured level directive.
///
/// Falls back to `debug` if the directive cannot be parsed.
#[must_use]
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        tracing::warn!(level = %level, error = %e, "Invalid log level, falling back to debug");
        EnvFilter::new(FALLBACK_LEVEL)
    })
}

/// ## Summary
/// Installs a global `fmt` subscriber filtered at `level`.
///
/// ## Errors
/// Returns an error if a global subscriber is already installed.
pub fn init(level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::debug!(level = %level, "Logging initialised");

    Ok(())
}
