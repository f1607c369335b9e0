//! Error types for the widgetshell core.

use thiserror::Error;

/// Errors that can occur in widgetshell operations.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error for '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Rejections produced when the user enters an absolute wall-clock time.
///
/// None of these change clock state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Invalid time '{0}'. Expected HH:MM")]
    Malformed(String),

    #[error("Time {hour}:{minute:02} is out of range")]
    OutOfRange { hour: u32, minute: u32 },

    #[error("Clock is not in edit mode")]
    NotEditing,
}

/// Result type alias for widgetshell operations.
pub type ShellResult<T> = Result<T, ShellError>;
