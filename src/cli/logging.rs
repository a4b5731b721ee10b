use tracing_subscriber::{fmt, EnvFilter};

use super::errors::{CliError, CliResult};

/// Installs a stderr subscriber filtered by `level`; stdout stays pure JSON
pub fn init_logging(level: &str) -> CliResult<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| CliError::logging_error(format!("Invalid log level: {e}")))?,
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|_| CliError::logging_error("Logging already initialized"))
}
