//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;
use crate::error::{AppError, AppResult};

/// Install the global tracing subscriber.
///
/// `RUST_LOG`-style directives in `log_level` are honoured; an unparsable
/// directive falls back to "info". Fails if a global subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> AppResult<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| AppError::internal(format!("failed to install tracing subscriber: {e}")))?;

    tracing::info!(service = %config.service_name, "Tracing initialized");
    Ok(())
}
