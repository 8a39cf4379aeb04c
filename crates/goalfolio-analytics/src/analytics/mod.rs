//! Performance analytics over normalized goal data.
//!
//! - [`returns`]: return between a start date and the latest point
//! - [`returns_table`]: reported window returns with series fallback
//! - [`merge`]: summing goal series by date
//! - [`weighted`]: net-investment weighted averages
//! - [`summary`]: group-level metric summarization
//! - [`group`]: the combined group view

pub mod group;
pub mod merge;
pub mod returns;
pub mod returns_table;
pub mod summary;
pub mod weighted;

pub use group::{build_group_summary, GroupPerformanceSummary};
pub use merge::merge_series;
pub use returns::return_from_series;
pub use returns_table::{derive_window_returns, derive_windows, map_returns_table};
pub use summary::summarize_metrics;
pub use weighted::{
    aggregate_window_returns, weighted_average, weighted_window_returns, WeightedSum,
};
