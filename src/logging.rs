//! Logger bootstrap for the binary.
//!
//! Events use a `event=<name> module=<module> status=<ok|error>` prefix so
//! they can be grepped and parsed. Passwords never appear in log lines; use
//! [`DatabaseConfig::redacted`](crate::config::DatabaseConfig::redacted).

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),

    #[error("failed to start logger: {0}")]
    Backend(#[from] FlexiLoggerError),
}

/// Starts a stderr logger at `level`. `RUST_LOG`, when set, takes precedence.
///
/// The returned handle must be kept alive for as long as logging is needed.
pub fn init_logging(level: &str) -> Result<LoggerHandle, LoggingError> {
    let level = normalize_level(level)?;

    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=app_start module=core status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}
