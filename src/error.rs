//! Error types for the HostStats client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using HostStatsError
pub type Result<T> = std::result::Result<T, HostStatsError>;

/// Unified error type for HostStats client operations
#[derive(Debug, Error)]
pub enum HostStatsError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("connect to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The server answered with an `ERROR:`-tagged payload.
    #[error("server error (code {code}): {message}")]
    BadCommand { message: String, code: i32 },

    /// The payload was not error-tagged but could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl HostStatsError {
    /// True for server-side `ERROR:` replies, false for transport/decode failures
    pub fn is_bad_command(&self) -> bool {
        matches!(self, HostStatsError::BadCommand { .. })
    }
}
