//! Summarized performance metrics for a goal group.

use serde::{Deserialize, Serialize};

/// Group-level performance metrics.
///
/// Every field is independently nullable: `None` means no goal reported the
/// figure, which is distinct from a reported zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Net-investment weighted total cumulative return (fraction).
    pub total_return_percent: Option<f64>,

    /// Net-investment weighted simple rate of return (fraction).
    pub simple_return_percent: Option<f64>,

    /// Net-investment weighted time-weighted return (fraction).
    pub twr_percent: Option<f64>,

    /// Net-investment weighted annualised IRR (fraction).
    pub annualised_irr_percent: Option<f64>,

    /// Sum of total cumulative return amounts.
    pub total_return_amount: Option<f64>,

    /// Sum of access fees minus trailer fee rebates.
    pub net_fees_amount: Option<f64>,

    /// Sum of net investment.
    pub net_investment_amount: Option<f64>,

    /// Sum of ending balances.
    pub ending_balance_amount: Option<f64>,
}

impl PerformanceMetrics {
    /// Returns true when every field is `None`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            self.total_return_percent,
            self.simple_return_percent,
            self.twr_percent,
            self.annualised_irr_percent,
            self.total_return_amount,
            self.net_fees_amount,
            self.net_investment_amount,
            self.ending_balance_amount,
        ]
        .iter()
        .all(Option::is_none)
    }
}
