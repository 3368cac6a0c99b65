//! `tracing` subscriber setup for the binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::diagnostics::JobsafeError;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "JOBSAFE_LOG";

/// Installs a stderr subscriber. Precedence: `JOBSAFE_LOG`, `RUST_LOG`,
/// `--verbose` (debug), then the configured level.
pub fn init(level: &str, verbose: bool, ansi: bool) -> Result<(), JobsafeError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(if verbose { "debug" } else { level }))
        .map_err(|e| JobsafeError::Logging(e.to_string()))?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| JobsafeError::Logging(e.to_string()))
}
