//! Error types for the file-point resolver.
//!
//! The resolution engine itself never fails: missing files, extractor
//! failures and filesystem errors all degrade to "no reference". These
//! errors only surface from the host layer (loading a buffer, validating
//! cursor arguments, configuration).

use thiserror::Error;

/// Result type alias for file-point operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for file-point.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Host Errors =====
    #[error("Buffer not found: {0}")]
    BufferNotFound(String),

    #[error("Invalid cursor: line {line} is outside a buffer of {line_count} lines")]
    InvalidCursor { line: usize, line_count: usize },

    #[error("Cfile extraction failed: {0}")]
    Extraction(String),

    // ===== I/O Errors =====
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== Internal Errors =====
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }
}
