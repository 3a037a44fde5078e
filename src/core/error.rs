//! Error types for the widget core
//!
//! Nothing here is fatal to the widget: every variant is recovered by a
//! fallback at the call site and only surfaces as a log line.

use std::fmt::Debug;

use thiserror::Error;
use tracing::warn;

/// Errors raised by the widget core and its storage backends
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Timezone id not known to the timezone database
    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),

    /// Settings store could not be reached or refused a write
    #[error("settings storage unavailable: {0}")]
    Storage(String),

    /// IO error (desktop settings file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (desktop settings file)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Log a failure the widget can live with and carry on. Returns whether
/// `result` was `Ok`.
pub fn log_soft_failure<E: Debug>(result: std::result::Result<(), E>, what: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(what, error = ?e, "Non-fatal operation failed");
            false
        }
    }
}
