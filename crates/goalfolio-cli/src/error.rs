//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No usable goal ids were given.
    #[error("No goal ids given. Pass at least one non-blank --goal.")]
    NoGoals,

    /// The engine configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
