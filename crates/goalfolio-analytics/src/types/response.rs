//! Untrusted per-goal performance payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::series::{NormalizeStats, TimeSeries};
use crate::types::window::AnchorDates;
use crate::value::{first_numeric, lookup, AMOUNT_KEYS, RETURN_KEYS};

/// Net investment locations, in priority order.
const NET_INVESTMENT_PATHS: &[&str] = &[
    "gainOrLossTable.netInvestment.allTimeValue",
    "netInvestmentAmount",
    "netInvestment",
];

/// Ending balance locations, in priority order.
const ENDING_BALANCE_PATHS: &[&str] = &[
    "endingBalanceAmount",
    "totalBalanceAmount",
    "marketValueAmount",
];

const SIMPLE_RETURN_PATHS: &[&str] = &["simpleRateOfReturnPercent", "simpleReturnPercent"];

const TWR_PATHS: &[&str] = &[
    "returnsTable.twr.allTimeValue",
    "timeWeightedReturnPercent",
    "twrPercent",
];

/// Raw performance payload for one goal, as returned by the upstream service.
///
/// Every field is optional and nothing is validated up front; accessors
/// coerce defensively and return `None` for anything missing or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPerformanceResponse(Value);

impl RawPerformanceResponse {
    /// Wraps a JSON value without checking its shape.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Wraps a JSON value only if it is an object.
    #[must_use]
    pub fn from_object(value: Value) -> Option<Self> {
        value.is_object().then_some(Self(value))
    }

    /// The underlying JSON.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the wrapper.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns true if the payload is a JSON object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    /// Looks up a dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.0, path)
    }

    /// `returnsTable`, if present.
    #[must_use]
    pub fn returns_table(&self) -> Option<&Value> {
        self.get("returnsTable")
    }

    /// Anchor dates from `performanceDates`.
    #[must_use]
    pub fn anchor_dates(&self) -> AnchorDates {
        AnchorDates::from_value(self.get("performanceDates"))
    }

    /// Normalized `timeSeries.data`.
    #[must_use]
    pub fn time_series(&self) -> TimeSeries {
        self.time_series_with_stats().0
    }

    /// Normalized `timeSeries.data` with normalizer counters.
    #[must_use]
    pub fn time_series_with_stats(&self) -> (TimeSeries, NormalizeStats) {
        match self.get("timeSeries.data") {
            Some(raw) => TimeSeries::normalize_with_stats(raw),
            None => (TimeSeries::empty(), NormalizeStats::default()),
        }
    }

    /// `totalCumulativeReturnAmount`.
    #[must_use]
    pub fn total_return_amount(&self) -> Option<f64> {
        self.amount(&["totalCumulativeReturnAmount"])
    }

    /// Net investment (all-time), also used as the aggregation weight.
    #[must_use]
    pub fn net_investment(&self) -> Option<f64> {
        self.amount(NET_INVESTMENT_PATHS)
    }

    /// All-time access fees charged.
    #[must_use]
    pub fn access_fees(&self) -> Option<f64> {
        self.amount(&["gainOrLossTable.accessFeeCharged.allTimeValue"])
    }

    /// All-time trailer fee rebates.
    #[must_use]
    pub fn trailer_fee_rebates(&self) -> Option<f64> {
        self.amount(&["gainOrLossTable.trailerFeeRebates.allTimeValue"])
    }

    /// Ending balance as reported by the provider.
    #[must_use]
    pub fn ending_balance(&self) -> Option<f64> {
        self.amount(ENDING_BALANCE_PATHS)
    }

    /// `totalCumulativeReturnPercent`.
    #[must_use]
    pub fn total_return_percent(&self) -> Option<f64> {
        self.ratio(&["totalCumulativeReturnPercent"])
    }

    /// Simple rate of return.
    #[must_use]
    pub fn simple_return_percent(&self) -> Option<f64> {
        self.ratio(SIMPLE_RETURN_PATHS)
    }

    /// All-time time-weighted return.
    #[must_use]
    pub fn twr_percent(&self) -> Option<f64> {
        self.ratio(TWR_PATHS)
    }

    /// All-time annualised internal rate of return.
    #[must_use]
    pub fn annualised_irr_percent(&self) -> Option<f64> {
        self.ratio(&["returnsTable.annualisedIrr.allTimeValue"])
    }

    fn amount(&self, paths: &[&str]) -> Option<f64> {
        first_numeric(&self.0, paths, AMOUNT_KEYS)
    }

    fn ratio(&self, paths: &[&str]) -> Option<f64> {
        first_numeric(&self.0, paths, RETURN_KEYS)
    }
}

impl From<Value> for RawPerformanceResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
