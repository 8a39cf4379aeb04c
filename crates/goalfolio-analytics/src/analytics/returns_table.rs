//! Provider-supplied window returns and the series fallback.

use serde_json::Value;

use crate::analytics::returns::return_from_series;
use crate::types::{window_start_date, AnchorDates, RawPerformanceResponse, TimeSeries, WindowReturns};
use crate::value::{unwrap_numeric, RETURN_KEYS};

/// Extracts per-window returns from a `returnsTable` object.
///
/// Each `returnsTable.twr.<window>Value` may be a plain number or an object
/// wrapping it (see [`RETURN_KEYS`]). Missing or invalid entries are `None`;
/// a missing `twr` table yields all `None`.
#[must_use]
pub fn map_returns_table(returns_table: Option<&Value>) -> WindowReturns {
    let Some(twr) = returns_table
        .and_then(|table| table.get("twr"))
        .filter(|twr| twr.is_object())
    else {
        return WindowReturns::default();
    };

    WindowReturns::from_fn(|key| {
        twr.get(key.table_field())
            .and_then(|value| unwrap_numeric(value, RETURN_KEYS))
    })
}

/// Derives all five window returns for one goal.
///
/// Uses the mapped table value when present; otherwise computes the window
/// start from the goal's own series and falls back to
/// [`return_from_series`].
#[must_use]
pub fn derive_windows(
    returns_table: Option<&Value>,
    anchors: &AnchorDates,
    series: &TimeSeries,
) -> WindowReturns {
    let mapped = map_returns_table(returns_table);
    WindowReturns::from_fn(|key| {
        mapped.get(key).or_else(|| {
            let start = window_start_date(key, series, anchors);
            return_from_series(series, start)
        })
    })
}

/// Derives all five window returns from a raw payload.
#[must_use]
pub fn derive_window_returns(response: &RawPerformanceResponse) -> WindowReturns {
    derive_windows(
        response.returns_table(),
        &response.anchor_dates(),
        &response.time_series(),
    )
}
