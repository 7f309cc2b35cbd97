//! Toolkit error types
//!
//! Most toolkit failures are policy outcomes rather than faults: they are
//! reported to the caller and leave the existing state untouched.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by toolkit operations
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Another owner already holds modal event suppression
    #[error("event dispatch is already suppressed by another owner")]
    EventsSuppressed,

    /// A dialog is already open
    #[error("a dialog is already open")]
    DialogBusy,

    /// An image collaborator could not decode a file
    #[error("failed to decode image {path}: {reason}")]
    ImageDecode {
        /// Path that was requested
        path: String,
        /// Decoder message
        reason: String,
    },

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias for toolkit operations
pub type WidgetResult<T> = Result<T, WidgetError>;
