//! Savings summary over a scored provider set.

use rust_decimal::Decimal;

use super::types::{ScoredProvider, Summary};

/// Derives worst-to-best savings statistics.
pub struct SummaryBuilder;

impl SummaryBuilder {
    /// Summarizes a scored set. The baseline is the most expensive provider,
    /// not an average. An empty set yields all zeros.
    #[must_use]
    pub fn summarize(scored: &[ScoredProvider]) -> Summary {
        let baseline_cost = scored
            .iter()
            .map(|s| s.total_cost)
            .max()
            .unwrap_or(Decimal::ZERO);
        let best_cost = scored
            .iter()
            .map(|s| s.total_cost)
            .min()
            .unwrap_or(Decimal::ZERO);
        let savings = baseline_cost.saturating_sub(best_cost);

        let savings_percentage = if baseline_cost > Decimal::ZERO {
            savings
                .checked_div(baseline_cost)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Summary {
            baseline_cost,
            best_cost,
            savings,
            savings_percentage,
            total_providers: scored.len(),
        }
    }
}
