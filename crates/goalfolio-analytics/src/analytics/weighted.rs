//! Net-investment weighted aggregation across goals.
//!
//! ## Formula
//!
//! ```text
//! weighted = Σ(value_i × weight_i) / Σ(weight_i)
//! ```
//!
//! Pairs with a non-positive or non-finite weight, or a missing or
//! non-finite value, are skipped. A goal missing one window is excluded from
//! that window's average only.

use crate::analytics::returns_table::derive_window_returns;
use crate::types::{RawPerformanceResponse, WindowKey, WindowReturns};

/// Running weighted sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSum {
    total: f64,
    total_weight: f64,
}

impl WeightedSum {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pair; ignored unless the value is finite and the weight is
    /// finite and positive.
    pub fn add(&mut self, value: Option<f64>, weight: f64) {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return;
        };
        if !weight.is_finite() || weight <= 0.0 {
            return;
        }
        self.total += value * weight;
        self.total_weight += weight;
    }

    /// The weighted average, or `None` if nothing was added.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.total_weight > 0.0 {
            Some(self.total / self.total_weight)
        } else {
            None
        }
    }
}

/// Weighted average of `values` by `weights`.
///
/// Returns `None` if the slices differ in length or the total weight is zero.
#[must_use]
pub fn weighted_average(values: &[Option<f64>], weights: &[f64]) -> Option<f64> {
    if values.len() != weights.len() {
        return None;
    }
    let mut sum = WeightedSum::new();
    for (value, weight) in values.iter().zip(weights) {
        sum.add(*value, *weight);
    }
    sum.average()
}

/// Weighted per-window returns from `(windows, weight)` pairs.
#[must_use]
pub fn weighted_window_returns(goals: &[(WindowReturns, f64)]) -> WindowReturns {
    WindowReturns::from_fn(|key: WindowKey| {
        let mut sum = WeightedSum::new();
        for (windows, weight) in goals {
            sum.add(windows.get(key), *weight);
        }
        sum.average()
    })
}

/// Derives each goal's windows and weights them by the goal's net investment.
///
/// Goals without a positive net investment do not contribute.
#[must_use]
pub fn aggregate_window_returns(responses: &[RawPerformanceResponse]) -> WindowReturns {
    let goals: Vec<(WindowReturns, f64)> = responses
        .iter()
        .filter_map(|response| {
            let weight = response.net_investment().filter(|w| *w > 0.0)?;
            Some((derive_window_returns(response), weight))
        })
        .collect();
    weighted_window_returns(&goals)
}
