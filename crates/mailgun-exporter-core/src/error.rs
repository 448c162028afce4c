//! Shared error type across the exporter crates.

use std::time::Duration;

use thiserror::Error;

/// Stable error categories, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid startup configuration.
    Config,
    /// Connection-level failure talking to the upstream API.
    Transport,
    /// Upstream call exceeded its deadline.
    Timeout,
    /// Upstream answered with a non-success status.
    Upstream,
    /// Upstream body could not be decoded.
    Decode,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Upstream => "UPSTREAM",
            ErrorKind::Decode => "DECODE",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and server.
#[derive(Debug, Clone, Error)]
pub enum ExporterError {
    #[error("config: {0}")]
    Config(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("decode: {0}")]
    Decode(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    /// Map the error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Config(_) => ErrorKind::Config,
            ExporterError::Transport(_) => ErrorKind::Transport,
            ExporterError::Timeout(_) => ErrorKind::Timeout,
            ExporterError::Upstream { .. } => ErrorKind::Upstream,
            ExporterError::Decode(_) => ErrorKind::Decode,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
