//! # Goalfolio Ext File
//!
//! File-based performance snapshots for the Goalfolio engine.
//!
//! This crate provides a default [`PerformanceSource`](goalfolio_traits::PerformanceSource)
//! for testing, demos and offline replays:
//! - [`JsonDirectorySource`]: one JSON payload per goal in a directory
//!
//! For live data, implement the trait over the upstream HTTP API.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod json_directory;

pub use json_directory::JsonDirectorySource;
