//! Error types for performance sources.

use thiserror::Error;

/// Error raised by a [`PerformanceSource`](crate::PerformanceSource).
///
/// Every variant is treated the same way downstream: the goal is considered
/// unavailable for the current pass. The connection, status, authentication,
/// rate-limit and internal variants are for HTTP-backed implementations; the
/// bundled sources never raise them.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection to the upstream service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Upstream replied with a non-success status
    #[error("request failed with status {0}")]
    Status(u16),

    /// Requested goal not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Request timed out
    #[error("timeout")]
    Timeout,

    /// Payload could not be parsed
    #[error("parse error: {0}")]
    ParseError(String),

    /// Payload parsed but is not a JSON object
    #[error("unexpected payload: {0}")]
    InvalidPayload(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Authentication failed
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limited
    #[error("rate limited")]
    RateLimited,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound(e.to_string())
        } else {
            SourceError::IoError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::ParseError(e.to_string())
    }
}
