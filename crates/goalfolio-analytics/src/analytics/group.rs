//! Combined performance view of a goal group.

use serde::{Deserialize, Serialize};

use crate::analytics::merge::merge_series;
use crate::analytics::returns_table::derive_window_returns;
use crate::analytics::summary::summarize_metrics;
use crate::analytics::weighted::aggregate_window_returns;
use crate::types::{
    window_start_date, AnchorDates, ChartPoint, PerformanceMetrics, RawPerformanceResponse,
    WindowKey, WindowReturns,
};

/// Performance of a group of goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPerformanceSummary {
    /// The full merged series.
    pub merged_series: Vec<ChartPoint>,

    /// The merged series bounded to the chart window.
    pub window_series: Vec<ChartPoint>,

    /// Per-window returns.
    pub window_returns: WindowReturns,

    /// Summarized metrics.
    pub metrics: PerformanceMetrics,
}

impl GroupPerformanceSummary {
    /// True when nothing in the summary carries data.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.merged_series.is_empty() && self.window_returns.is_empty() && self.metrics.is_empty()
    }
}

/// Builds the group summary from the goals that resolved.
///
/// Returns `None` when `responses` is empty. A single goal reports its own
/// derived windows; several goals report the net-investment weighted average
/// of each goal's derived windows.
#[must_use]
pub fn build_group_summary(
    responses: &[RawPerformanceResponse],
    chart_window: WindowKey,
) -> Option<GroupPerformanceSummary> {
    if responses.is_empty() {
        return None;
    }

    let series: Vec<_> = responses.iter().map(RawPerformanceResponse::time_series).collect();
    let merged = merge_series(&series);

    let (window_returns, anchors) = match responses {
        [single] => (derive_window_returns(single), single.anchor_dates()),
        _ => (aggregate_window_returns(responses), AnchorDates::none()),
    };

    let start = window_start_date(chart_window, &merged, &anchors);
    let metrics = summarize_metrics(responses, &merged);

    Some(GroupPerformanceSummary {
        merged_series: merged.to_chart_points(),
        window_series: merged.window(start),
        window_returns,
        metrics,
    })
}
