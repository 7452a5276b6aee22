//! Error types for Drive Sense

use std::io;
use thiserror::Error;

/// Result type alias for drive operations
pub type Result<T> = std::result::Result<T, SmartError>;

/// Error type for drive classification, refresh and reporting
#[derive(Error, Debug)]
pub enum SmartError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport collaborator failed to complete a query
    #[error("Transport error: {0}")]
    Transport(String),

    /// Drive index could not be opened
    #[error("Invalid handle for drive {0}")]
    InvalidHandle(usize),

    /// Drive cannot be classified or reported no usable name
    #[error("Unsupported drive: {0}")]
    Unsupported(String),

    /// Read attempted on a drive whose handle was released
    #[error("Drive is closed")]
    Closed,

    /// `close()` called on a drive that was already closed
    #[error("Drive was already closed")]
    AlreadyClosed,

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SmartError {
    /// Whether this error is a lifecycle violation by the caller
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, SmartError::Closed | SmartError::AlreadyClosed)
    }
}
