//! Normalized performance time series.
//!
//! Upstream series are known to be occasionally partial: points with an
//! unparsable date or a non-finite amount are dropped without raising, and
//! the drop count is reported through [`NormalizeStats`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::coerce_number;

/// Field names carrying the cumulative net investment, in priority order.
const NET_INVESTMENT_FIELDS: &[&str] = &["cumulativeNetInvestmentAmount", "cumulativeNetInvestment"];

/// Timestamp layouts accepted besides `YYYY-MM-DD` and RFC 3339.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// A single valid point of a performance series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Calendar date of the observation.
    pub date: NaiveDate,

    /// Market value on that date.
    pub amount: f64,

    /// Principal contributed minus withdrawn up to that date, when reported.
    pub cumulative_net_investment: Option<f64>,
}

impl TimeSeriesPoint {
    /// Creates a point without net investment data.
    #[must_use]
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self {
            date,
            amount,
            cumulative_net_investment: None,
        }
    }

    /// Sets the cumulative net investment.
    #[must_use]
    pub fn with_net_investment(mut self, net_investment: f64) -> Self {
        self.cumulative_net_investment = Some(net_investment).filter(|v| v.is_finite());
        self
    }

    fn from_raw(entry: &Value) -> Option<Self> {
        let date = parse_date(entry.get("date")?)?;
        let amount = coerce_number(entry.get("amount")?)?;
        let cumulative_net_investment = NET_INVESTMENT_FIELDS
            .iter()
            .filter_map(|field| entry.get(*field))
            .find(|v| !v.is_null())
            .and_then(coerce_number);
        Some(Self {
            date,
            amount,
            cumulative_net_investment,
        })
    }
}

/// A `{date, amount}` pair for chart rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Market value.
    pub amount: f64,
}

impl From<&TimeSeriesPoint> for ChartPoint {
    fn from(point: &TimeSeriesPoint) -> Self {
        Self {
            date: point.date,
            amount: point.amount,
        }
    }
}

/// Counters reported by the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Points kept in the output.
    pub accepted: usize,
    /// Entries dropped for an invalid date or amount.
    pub dropped: usize,
    /// Valid entries superseded by a later entry with the same date.
    pub duplicates: usize,
}

/// An ascending-by-date, deduplicated sequence of valid points.
///
/// Values of this type can only be produced by the normalizer or the merger,
/// so the ordering invariant always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalizes a raw point array. Non-array input yields an empty series.
    #[must_use]
    pub fn normalize(raw: &Value) -> Self {
        Self::normalize_with_stats(raw).0
    }

    /// Normalizes a raw point array and reports what was dropped.
    #[must_use]
    pub fn normalize_with_stats(raw: &Value) -> (Self, NormalizeStats) {
        let Some(entries) = raw.as_array() else {
            return (Self::empty(), NormalizeStats::default());
        };

        let parsed: Vec<TimeSeriesPoint> =
            entries.iter().filter_map(TimeSeriesPoint::from_raw).collect();
        let dropped = entries.len() - parsed.len();
        let valid = parsed.len();
        let series = Self::from_points(parsed);

        let stats = NormalizeStats {
            accepted: series.len(),
            dropped,
            duplicates: valid - series.len(),
        };
        if stats.dropped > 0 {
            log::debug!(
                "Dropped {} malformed time series entries ({} kept)",
                stats.dropped,
                stats.accepted
            );
        }
        (series, stats)
    }

    /// Builds a series from already-typed points.
    ///
    /// Points with a non-finite amount are discarded; the rest are sorted by
    /// date and, for repeated dates, the point given last wins.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = TimeSeriesPoint>) -> Self {
        let mut points: Vec<TimeSeriesPoint> =
            points.into_iter().filter(|p| p.amount.is_finite()).collect();
        // Stable sort keeps input order among equal dates.
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<TimeSeriesPoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    /// All points, ascending by date.
    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent point.
    #[must_use]
    pub fn latest(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }

    /// The latest point dated on or before `date`.
    #[must_use]
    pub fn nearest_on_or_before(&self, date: NaiveDate) -> Option<&TimeSeriesPoint> {
        let idx = self.points.partition_point(|p| p.date <= date);
        idx.checked_sub(1).map(|i| &self.points[i])
    }

    /// Points dated on or after `start` as chart pairs; all points when
    /// `start` is `None`.
    #[must_use]
    pub fn window(&self, start: Option<NaiveDate>) -> Vec<ChartPoint> {
        let from = match start {
            Some(start) => self.points.partition_point(|p| p.date < start),
            None => 0,
        };
        self.points[from..].iter().map(ChartPoint::from).collect()
    }

    /// The whole series as chart pairs.
    #[must_use]
    pub fn to_chart_points(&self) -> Vec<ChartPoint> {
        self.window(None)
    }
}

/// Normalizes a raw point array. See [`TimeSeries::normalize`].
#[must_use]
pub fn normalize_time_series(raw: &Value) -> TimeSeries {
    TimeSeries::normalize(raw)
}

/// Returns the bounded chart window of a series. See [`TimeSeries::window`].
#[must_use]
pub fn series_window(series: &TimeSeries, start: Option<NaiveDate>) -> Vec<ChartPoint> {
    series.window(start)
}

/// Coerces a JSON date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 and naive ISO timestamps, and JSON numbers
/// interpreted as epoch milliseconds.
#[must_use]
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let millis = n.as_f64().filter(|v| v.is_finite())?;
            DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// Parses a date string. See [`parse_date`].
#[must_use]
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
