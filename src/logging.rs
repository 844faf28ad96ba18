//! Tracing subscriber setup for binaries and tests that embed daylog.
//!
//! The library itself only emits events through `tracing` macros; nothing is
//! printed unless a subscriber is installed.

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::errors::{AppError, AppResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set; a blank `level` means
/// `info`. `format` is either `text` or `json`.
///
/// # Errors
///
/// Returns `AppError::Config` for an unknown format or level, or when a
/// global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// daylog::logging::init_tracing("json", "debug")?;
/// # Ok::<(), daylog::AppError>(())
/// ```
pub fn init_tracing(format: &str, level: &str) -> AppResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(level)?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LOG_FORMAT_JSON => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
        LOG_FORMAT_TEXT => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        other => {
            return Err(AppError::Config(format!(
                "Unknown log format '{}', expected {} or {}",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )))
        }
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}

fn level_filter(level: &str) -> AppResult<EnvFilter> {
    let level = match level.trim() {
        "" => DEFAULT_LOG_LEVEL,
        level => level,
    };
    EnvFilter::try_new(level)
        .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", level, e)))
}
