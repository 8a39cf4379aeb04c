//! Error types for performance analytics.
//!
//! Analytics are total functions over untrusted data: missing or malformed
//! inputs degrade to `None`. The only fallible operation is parsing a
//! caller-supplied window name.

use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur during analytics operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Unrecognised performance window name.
    #[error("Unknown performance window: {name}")]
    UnknownWindow {
        /// The name that failed to parse.
        name: String,
    },
}

impl AnalyticsError {
    /// Create an unknown window error.
    #[must_use]
    pub fn unknown_window(name: impl Into<String>) -> Self {
        Self::UnknownWindow { name: name.into() }
    }
}
