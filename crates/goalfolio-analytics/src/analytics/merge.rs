//! Summing several goals' series into one.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{TimeSeries, TimeSeriesPoint};

/// Merges series by exact date, summing amounts.
///
/// Emits one ascending point per distinct date. A date present in only some
/// of the inputs still produces a point from the available subset; nothing
/// is interpolated. Merged points carry no net investment.
#[must_use]
pub fn merge_series(collection: &[TimeSeries]) -> TimeSeries {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in collection.iter().flat_map(TimeSeries::points) {
        *totals.entry(point.date).or_insert(0.0) += point.amount;
    }
    TimeSeries::from_points(
        totals
            .into_iter()
            .map(|(date, amount)| TimeSeriesPoint::new(date, amount)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> TimeSeries {
        TimeSeries::from_points(points.iter().map(|(d, a)| TimeSeriesPoint::new(*d, *a)))
    }

    #[test]
    fn test_merge_sums_by_date() {
        let a = series(&[(date(2024, 1, 1), 100.0), (date(2024, 1, 2), 110.0)]);
        let b = series(&[(date(2024, 1, 2), 50.0), (date(2024, 1, 3), 55.0)]);

        let merged = merge_series(&[a, b]);
        let amounts: Vec<_> = merged.points().iter().map(|p| (p.date, p.amount)).collect();
        assert_eq!(
            amounts,
            vec![
                (date(2024, 1, 1), 100.0),
                (date(2024, 1, 2), 160.0),
                (date(2024, 1, 3), 55.0),
            ]
        );
        assert!(merged.points().iter().all(|p| p.cumulative_net_investment.is_none()));
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge_series(&[]).is_empty());
        assert!(merge_series(&[TimeSeries::empty(), TimeSeries::empty()]).is_empty());
    }

    #[test]
    fn test_merge_is_pure() {
        let inputs = vec![
            series(&[(date(2024, 1, 1), 1.5), (date(2024, 2, 1), 2.5)]),
            series(&[(date(2024, 1, 1), 3.0)]),
        ];
        assert_eq!(merge_series(&inputs), merge_series(&inputs));
    }
}
