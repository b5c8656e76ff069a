//! Logger setup for the `peaks` binary.
//!
//! The library only uses the `log` facade; the binary decides where records go.

use flexi_logger::{Logger, LoggerHandle};

use crate::error::AppError;

/// Environment variable holding a flexi_logger spec, e.g. `debug` or `info,peaks2d::models=debug`.
pub const LOG_ENV: &str = "PEAKS_LOG";

pub const DEFAULT_LOG_SPEC: &str = "info";

/// Log spec from `PEAKS_LOG` (a `.env` file is honoured), else [`DEFAULT_LOG_SPEC`].
pub fn log_spec_from_env() -> String {
    dotenvy::dotenv().ok();
    std::env::var(LOG_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_SPEC.to_string())
}

/// Start logging to stderr. Keep the returned handle alive for the process lifetime.
pub fn setup_logging(spec: &str) -> Result<LoggerHandle, AppError> {
    Logger::try_with_str(spec)
        .map_err(|e| AppError::new(2, format!("Invalid log spec '{spec}': {e}")))?
        .log_to_stderr()
        .start()
        .map_err(|e| AppError::new(4, format!("Logger initialization failed: {e}")))
}
