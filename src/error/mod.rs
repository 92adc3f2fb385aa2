//! Error handling module for reelcut

use thiserror::Error;

/// Main error type for reelcut operations
#[derive(Error, Debug)]
pub enum ReelError {
    /// External media tool exited with a non-zero status; carries the
    /// captured stdout/stderr verbatim
    #[error("media tool exited with status {code}: {output}")]
    MediaTool { code: i32, output: String },

    /// An expected file is missing
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// Source video cannot be clipped
    #[error("invalid source: {message}")]
    InvalidSource { message: String },

    /// Remote fetch tool failure, surfaced opaquely
    #[error("download failed: {message}")]
    Download { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed structured report from an external tool
    #[error("malformed tool output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for reelcut operations
pub type ReelResult<T> = std::result::Result<T, ReelError>;
