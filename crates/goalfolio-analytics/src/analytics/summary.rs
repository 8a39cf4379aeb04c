//! Group-level metric summarization.

use crate::analytics::weighted::WeightedSum;
use crate::types::{PerformanceMetrics, RawPerformanceResponse, TimeSeries};

/// Sum that remembers whether any value contributed.
///
/// An all-absent field reports `None` while an all-zero field reports `0`.
#[derive(Debug, Clone, Copy, Default)]
struct SeenSum {
    total: f64,
    seen: bool,
}

impl SeenSum {
    fn add(&mut self, value: Option<f64>) {
        if let Some(value) = value.filter(|v| v.is_finite()) {
            self.total += value;
            self.seen = true;
        }
    }

    fn value(self) -> Option<f64> {
        self.seen.then_some(self.total)
    }
}

/// Summarizes performance metrics across the goals of a group.
///
/// Amounts are summed. Ratios are weighted by each goal's positive net
/// investment. If no goal reports an ending balance, the last point of
/// `merged` is used instead; net investment is never inferred from it.
#[must_use]
pub fn summarize_metrics(
    responses: &[RawPerformanceResponse],
    merged: &TimeSeries,
) -> PerformanceMetrics {
    let mut total_return_amount = SeenSum::default();
    let mut net_fees = SeenSum::default();
    let mut net_investment = SeenSum::default();
    let mut ending_balance = SeenSum::default();

    let mut total_return_percent = WeightedSum::new();
    let mut simple_return_percent = WeightedSum::new();
    let mut twr_percent = WeightedSum::new();
    let mut irr_percent = WeightedSum::new();

    for response in responses {
        total_return_amount.add(response.total_return_amount());

        let access = response.access_fees();
        let rebates = response.trailer_fee_rebates();
        if access.is_some() || rebates.is_some() {
            net_fees.add(Some(access.unwrap_or(0.0) - rebates.unwrap_or(0.0)));
        }

        let investment = response.net_investment();
        net_investment.add(investment);
        ending_balance.add(response.ending_balance());

        let weight = investment.unwrap_or(0.0);
        total_return_percent.add(response.total_return_percent(), weight);
        simple_return_percent.add(response.simple_return_percent(), weight);
        twr_percent.add(response.twr_percent(), weight);
        irr_percent.add(response.annualised_irr_percent(), weight);
    }

    if !ending_balance.seen {
        ending_balance.add(merged.latest().map(|p| p.amount));
    }

    PerformanceMetrics {
        total_return_percent: total_return_percent.average(),
        simple_return_percent: simple_return_percent.average(),
        twr_percent: twr_percent.average(),
        annualised_irr_percent: irr_percent.average(),
        total_return_amount: total_return_amount.value(),
        net_fees_amount: net_fees.value(),
        net_investment_amount: net_investment.value(),
        ending_balance_amount: ending_balance.value(),
    }
}
