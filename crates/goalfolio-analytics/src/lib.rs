//! # Goalfolio Analytics
//!
//! Performance analytics for investment goals and groups of goals.
//!
//! This crate turns loosely-shaped upstream performance payloads into
//! normalized time series, trailing-window returns and group summaries.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Tolerant input**: Payload fields are optional and coerced defensively
//! - **Absent is not zero**: Missing figures are `None`, reported zeros stay `0`
//!
//! ## Features
//!
//! - **Normalization**: Ordered, deduplicated series from raw point arrays
//! - **Window Returns**: 1M, 6M, YTD, 1Y, 3Y from reported tables or series
//! - **Cash-flow Adjustment**: Net-investment corrected point-to-point returns
//! - **Aggregation**: Series merging and net-investment weighted averages
//! - **Summaries**: Group metrics with per-field presence tracking
//!
//! ## Quick Start
//!
//! ```rust
//! use goalfolio_analytics::prelude::*;
//! use serde_json::json;
//!
//! let response = RawPerformanceResponse::new(json!({
//!     "gainOrLossTable": { "netInvestment": { "allTimeValue": 100 } },
//!     "timeSeries": { "data": [
//!         { "date": "2024-01-01", "amount": 100 },
//!         { "date": "2024-06-03", "amount": 120 }
//!     ] }
//! }));
//!
//! let summary = build_group_summary(&[response], WindowKey::OneYear).unwrap();
//! assert_eq!(summary.window_series.len(), 2);
//! assert!(summary.window_returns.ytd.is_some());
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Returns, merging, weighting and summaries
//! - [`types`] - Series, windows, payload and metric types
//! - [`value`] - Numeric coercion helpers for untrusted JSON

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod error;
pub mod types;
pub mod value;

pub use error::{AnalyticsError, AnalyticsResult};

pub use types::{
    normalize_time_series, series_window, shift_months_back, window_start_date,
    window_start_date_by_name, AnchorDates, ChartPoint, NormalizeStats, PerformanceMetrics,
    RawPerformanceResponse, TimeSeries, TimeSeriesPoint, WindowKey, WindowReturns,
};

pub use analytics::{
    aggregate_window_returns, build_group_summary, derive_window_returns, derive_windows,
    map_returns_table, merge_series, return_from_series, summarize_metrics, weighted_average,
    weighted_window_returns, GroupPerformanceSummary, WeightedSum,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use goalfolio_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};

    pub use crate::types::{
        AnchorDates, ChartPoint, PerformanceMetrics, RawPerformanceResponse, TimeSeries,
        TimeSeriesPoint, WindowKey, WindowReturns,
    };

    pub use crate::analytics::{
        build_group_summary, derive_window_returns, merge_series, return_from_series,
        summarize_metrics, weighted_average, GroupPerformanceSummary,
    };

    pub use chrono::NaiveDate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        let err = AnalyticsError::unknown_window("twoYear");
        assert!(err.to_string().contains("twoYear"));
    }
}
