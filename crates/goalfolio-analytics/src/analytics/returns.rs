//! Cash-flow adjusted returns between two points of a series.

use chrono::NaiveDate;

use crate::types::TimeSeries;

/// Calculates the return of a series from `start_date` to its latest point.
///
/// ## Formula
///
/// ```text
/// adjusted_end = end_amount − (end_net_investment − start_net_investment)
/// return       = adjusted_end / start_amount − 1
/// ```
///
/// The start point is the latest point dated on or before `start_date`. The
/// net-investment adjustment strips contributions made between the two points
/// and is applied only when both points carry a cumulative net investment;
/// otherwise the raw end amount is used. The two cumulative figures are
/// assumed comparable and are not cross-checked.
///
/// # Returns
///
/// `None` when `start_date` is `None`, the series has fewer than two points,
/// no point lies on or before `start_date`, or the start amount is zero.
#[must_use]
pub fn return_from_series(series: &TimeSeries, start_date: Option<NaiveDate>) -> Option<f64> {
    let start_date = start_date?;
    if series.len() < 2 {
        return None;
    }
    let start = series.nearest_on_or_before(start_date)?;
    let end = series.latest()?;

    if !start.amount.is_finite() || start.amount == 0.0 {
        return None;
    }

    let adjusted_end = match (start.cumulative_net_investment, end.cumulative_net_investment) {
        (Some(start_net), Some(end_net)) if start_net.is_finite() && end_net.is_finite() => {
            end.amount - (end_net - start_net)
        }
        _ => end.amount,
    };
    if !adjusted_end.is_finite() {
        return None;
    }

    Some(adjusted_end / start.amount - 1.0)
}
