//! # Goalfolio Traits
//!
//! Trait definitions for the Goalfolio performance engine.
//!
//! This crate contains ONLY trait definitions and small shared types.
//! All implementations are in separate crates.
//!
//! ## Module Structure
//!
//! - [`source`]: Trait for upstream performance snapshot providers
//! - [`clock`]: Wall-clock abstraction used by cache freshness checks
//! - [`config`]: Execution mode and duration encoding
//! - [`ids`]: Goal identifiers
//! - [`error`]: Errors raised by performance sources
//!
//! ## Dependency Injection
//!
//! The orchestrator uses these traits via dependency injection:
//!
//! ```ignore
//! PerformanceOrchestrator::builder()
//!     .with_source(impl PerformanceSource)
//!     .with_store(impl KeyValueStore)
//!     .with_clock(impl Clock)
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod source;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ExecutionMode;
pub use error::SourceError;
pub use ids::GoalId;
pub use source::PerformanceSource;
