//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

/// Engine result type.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
///
/// Fetch and cache failures during a render pass are absorbed and logged;
/// these variants surface only from configuration and construction.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`EngineConfig`](crate::EngineConfig)
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl EngineError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Config(msg.into())
    }
}
