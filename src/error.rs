use thiserror::Error;
use tracing::{error, warn};

/// Domain-specific errors for Clipmate
#[derive(Error, Debug)]
pub enum ClipmateError {
    #[error("Settings persistence failed for '{path}': {source}")]
    SettingsPersist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings document JSON error: {0}")]
    SettingsJson(#[from] serde_json::Error),

    #[error("Image encoding failed: {0}")]
    ImageEncode(String),

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),
}

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, ClipmateError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller doesn't need the error.
///
/// Persistence writes and clipboard reads are absorbed at their boundaries
/// (in-memory state stays authoritative for the session), so most call sites
/// only need "log it and move on":
///
/// ```ignore
/// use clipmate::error::ResultExt;
///
/// // Swallow a failed settings write, keep in-memory state
/// save_document(&doc).log_err();
///
/// // Log as warning for expected failures
/// let text = clipboard.read_text().warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
