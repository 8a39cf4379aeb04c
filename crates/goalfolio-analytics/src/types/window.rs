//! Trailing performance windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalyticsError;
use crate::types::series::{parse_date, TimeSeries};

/// Keys of `performanceDates` that may carry the year-start date, in priority order.
const YTD_ANCHOR_KEYS: &[&str] = &["ytd", "ytdStartDate", "yearStartDate"];

/// One of the five fixed trailing lookback periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowKey {
    /// One calendar month.
    OneMonth,
    /// Six calendar months.
    SixMonth,
    /// Since the start of the year.
    Ytd,
    /// One calendar year.
    OneYear,
    /// Three calendar years.
    ThreeYear,
}

impl WindowKey {
    /// All windows in display order.
    pub const ALL: [WindowKey; 5] = [
        WindowKey::OneMonth,
        WindowKey::SixMonth,
        WindowKey::Ytd,
        WindowKey::OneYear,
        WindowKey::ThreeYear,
    ];

    /// Canonical camelCase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            WindowKey::OneMonth => "oneMonth",
            WindowKey::SixMonth => "sixMonth",
            WindowKey::Ytd => "ytd",
            WindowKey::OneYear => "oneYear",
            WindowKey::ThreeYear => "threeYear",
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            WindowKey::OneMonth => "1M",
            WindowKey::SixMonth => "6M",
            WindowKey::Ytd => "YTD",
            WindowKey::OneYear => "1Y",
            WindowKey::ThreeYear => "3Y",
        }
    }

    /// Field name of this window inside `returnsTable.twr`.
    #[must_use]
    pub const fn table_field(&self) -> &'static str {
        match self {
            WindowKey::OneMonth => "oneMonthValue",
            WindowKey::SixMonth => "sixMonthValue",
            WindowKey::Ytd => "ytdValue",
            WindowKey::OneYear => "oneYearValue",
            WindowKey::ThreeYear => "threeYearValue",
        }
    }

    /// Months to step back from the anchor, for month-based windows.
    #[must_use]
    pub const fn months_back(&self) -> Option<u32> {
        match self {
            WindowKey::OneMonth => Some(1),
            WindowKey::SixMonth => Some(6),
            WindowKey::OneYear => Some(12),
            WindowKey::ThreeYear => Some(36),
            WindowKey::Ytd => None,
        }
    }
}

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s || key.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AnalyticsError::unknown_window(s))
    }
}

/// Explicit anchor dates supplied alongside a performance payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorDates {
    /// Provider-supplied start of the year-to-date window.
    pub ytd_start: Option<NaiveDate>,
}

impl AnchorDates {
    /// No explicit anchors.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Reads anchors from a `performanceDates` object. The first key of
    /// `ytd`, `ytdStartDate`, `yearStartDate` holding a valid date wins.
    #[must_use]
    pub fn from_value(performance_dates: Option<&Value>) -> Self {
        let ytd_start = performance_dates
            .and_then(Value::as_object)
            .and_then(|dates| {
                YTD_ANCHOR_KEYS
                    .iter()
                    .filter_map(|key| dates.get(*key))
                    .find_map(parse_date)
            });
        Self { ytd_start }
    }

    /// Sets the year-to-date start.
    #[must_use]
    pub fn with_ytd_start(mut self, date: NaiveDate) -> Self {
        self.ytd_start = Some(date);
        self
    }
}

/// Per-window returns as plain fractions (0.05 = 5%).
///
/// All five windows are always present; a window without data is `None`
/// and serializes as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReturns {
    /// One-month return.
    pub one_month: Option<f64>,
    /// Six-month return.
    pub six_month: Option<f64>,
    /// Year-to-date return.
    pub ytd: Option<f64>,
    /// One-year return.
    pub one_year: Option<f64>,
    /// Three-year return.
    pub three_year: Option<f64>,
}

impl WindowReturns {
    /// Returns the value for a window.
    #[must_use]
    pub fn get(&self, key: WindowKey) -> Option<f64> {
        match key {
            WindowKey::OneMonth => self.one_month,
            WindowKey::SixMonth => self.six_month,
            WindowKey::Ytd => self.ytd,
            WindowKey::OneYear => self.one_year,
            WindowKey::ThreeYear => self.three_year,
        }
    }

    /// Sets the value for a window.
    pub fn set(&mut self, key: WindowKey, value: Option<f64>) {
        let slot = match key {
            WindowKey::OneMonth => &mut self.one_month,
            WindowKey::SixMonth => &mut self.six_month,
            WindowKey::Ytd => &mut self.ytd,
            WindowKey::OneYear => &mut self.one_year,
            WindowKey::ThreeYear => &mut self.three_year,
        };
        *slot = value;
    }

    /// Builds returns by evaluating `f` for every window.
    pub fn from_fn(mut f: impl FnMut(WindowKey) -> Option<f64>) -> Self {
        let mut returns = Self::default();
        for key in WindowKey::ALL {
            returns.set(key, f(key));
        }
        returns
    }

    /// Iterates windows in display order.
    pub fn iter(&self) -> impl Iterator<Item = (WindowKey, Option<f64>)> + '_ {
        WindowKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Returns true when no window has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, v)| v.is_none())
    }
}

/// Computes the start date of a trailing window.
///
/// The anchor is the latest point of `series`. Month and year windows step
/// back in calendar months with day rollover (see [`shift_months_back`]).
/// `Ytd` prefers `anchors.ytd_start`, else 1 January of the anchor's year.
///
/// Returns `None` for an empty series.
#[must_use]
pub fn window_start_date(
    window: WindowKey,
    series: &TimeSeries,
    anchors: &AnchorDates,
) -> Option<NaiveDate> {
    let anchor = series.latest()?.date;
    match window.months_back() {
        Some(months) => shift_months_back(anchor, months),
        None => anchors
            .ytd_start
            .or_else(|| NaiveDate::from_ymd_opt(anchor.year(), 1, 1)),
    }
}

/// Like [`window_start_date`] but takes a window name; unknown names yield `None`.
#[must_use]
pub fn window_start_date_by_name(
    name: &str,
    series: &TimeSeries,
    anchors: &AnchorDates,
) -> Option<NaiveDate> {
    let window = name.parse::<WindowKey>().ok()?;
    window_start_date(window, series, anchors)
}

/// Steps a date back by whole calendar months.
///
/// The day of month is preserved; when it does not exist in the target month
/// the excess days spill into the following month, so 31 March minus one
/// month is 2 March in a leap year and 29 February minus twelve months is
/// 1 March.
#[must_use]
pub fn shift_months_back(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) - i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::series::TimeSeriesPoint;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series_ending(end: NaiveDate) -> TimeSeries {
        TimeSeries::from_points(vec![
            TimeSeriesPoint::new(date(2020, 1, 1), 100.0),
            TimeSeriesPoint::new(end, 150.0),
        ])
    }

    #[test]
    fn test_window_start_dates() {
        let series = series_ending(date(2024, 6, 3));
        let anchors = AnchorDates::none();

        assert_eq!(
            window_start_date(WindowKey::OneMonth, &series, &anchors),
            Some(date(2024, 5, 3))
        );
        assert_eq!(
            window_start_date(WindowKey::SixMonth, &series, &anchors),
            Some(date(2023, 12, 3))
        );
        assert_eq!(
            window_start_date(WindowKey::OneYear, &series, &anchors),
            Some(date(2023, 6, 3))
        );
        assert_eq!(
            window_start_date(WindowKey::ThreeYear, &series, &anchors),
            Some(date(2021, 6, 3))
        );
        assert_eq!(
            window_start_date(WindowKey::Ytd, &series, &anchors),
            Some(date(2024, 1, 1))
        );
    }

    #[test]
    fn test_ytd_prefers_explicit_anchor() {
        let series = series_ending(date(2024, 6, 3));
        let anchors = AnchorDates::from_value(Some(&json!({
            "ytd": "garbage",
            "ytdStartDate": "2023-12-29",
            "yearStartDate": "2024-01-02"
        })));
        assert_eq!(anchors.ytd_start, Some(date(2023, 12, 29)));
        assert_eq!(
            window_start_date(WindowKey::Ytd, &series, &anchors),
            Some(date(2023, 12, 29))
        );
    }

    #[test]
    fn test_empty_series_has_no_start() {
        let empty = TimeSeries::empty();
        for key in WindowKey::ALL {
            assert_eq!(window_start_date(key, &empty, &AnchorDates::none()), None);
        }
    }

    #[test]
    fn test_unknown_window_name() {
        let series = series_ending(date(2024, 6, 3));
        assert_eq!(
            window_start_date_by_name("fiveYear", &series, &AnchorDates::none()),
            None
        );
        assert_eq!(
            window_start_date_by_name("oneMonth", &series, &AnchorDates::none()),
            Some(date(2024, 5, 3))
        );
        assert!("fiveYear".parse::<WindowKey>().is_err());
        assert_eq!("1y".parse::<WindowKey>().unwrap(), WindowKey::OneYear);
    }

    #[test]
    fn test_month_rollover() {
        assert_eq!(shift_months_back(date(2024, 3, 31), 1), Some(date(2024, 3, 2)));
        assert_eq!(shift_months_back(date(2023, 3, 31), 1), Some(date(2023, 3, 3)));
        assert_eq!(shift_months_back(date(2024, 2, 29), 12), Some(date(2023, 3, 1)));
        assert_eq!(shift_months_back(date(2024, 1, 15), 1), Some(date(2023, 12, 15)));
        assert_eq!(shift_months_back(date(2024, 8, 31), 6), Some(date(2024, 3, 2)));
    }

    #[test]
    fn test_window_returns_accessors() {
        let mut returns = WindowReturns::default();
        assert!(returns.is_empty());
        returns.set(WindowKey::Ytd, Some(0.04));
        assert_eq!(returns.get(WindowKey::Ytd), Some(0.04));
        assert!(!returns.is_empty());

        let json = serde_json::to_value(returns).unwrap();
        assert_eq!(json["ytd"], 0.04);
        assert!(json["oneMonth"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
