//! Core types for goal performance analytics.

pub mod metrics;
pub mod response;
pub mod series;
pub mod window;

pub use metrics::PerformanceMetrics;
pub use response::RawPerformanceResponse;
pub use series::{
    normalize_time_series, parse_date, parse_date_str, series_window, ChartPoint, NormalizeStats,
    TimeSeries, TimeSeriesPoint,
};
pub use window::{
    shift_months_back, window_start_date, window_start_date_by_name, AnchorDates, WindowKey,
    WindowReturns,
};
