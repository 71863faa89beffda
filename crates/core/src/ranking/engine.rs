//! Ranking engine: scores every provider and picks a winner.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::cost::CostModel;
use super::summary::SummaryBuilder;
use super::types::{
    Priority, ProviderRecord, RecommendationResult, ScoredProvider, TransferRequest,
    UsdNormalization,
};
use crate::currency::{RateConverter, RateTable};
use crate::error::RecommendError;

/// Orchestrates the cost model over a provider table.
pub struct RankingEngine;

impl RankingEngine {
    /// Resolves the pair's rate from `usd_rates`, then ranks `providers`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the currencies are the same.
    /// - `RateUnavailable` if the pair cannot be priced from the table.
    /// - `NoProviders` if no provider produces a valid score.
    pub fn recommend(
        providers: &[ProviderRecord],
        request: &TransferRequest,
        usd_rates: &RateTable,
        normalization: &UsdNormalization,
    ) -> Result<RecommendationResult, RecommendError> {
        let rate = RateConverter::resolve_rate(
            &request.source_currency,
            &request.dest_currency,
            usd_rates,
        )?;
        Self::rank(providers, request, rate, normalization)
    }

    /// Ranks `providers` for an already resolved `rate`.
    ///
    /// # Errors
    ///
    /// - `RateUnavailable` if the amount cannot be expressed at `rate`.
    /// - `NoProviders` if no provider produces a valid score.
    pub fn rank(
        providers: &[ProviderRecord],
        request: &TransferRequest,
        rate: Decimal,
        normalization: &UsdNormalization,
    ) -> Result<RecommendationResult, RecommendError> {
        let mut scored = Self::score_all(providers, request, rate, normalization)?;
        if scored.is_empty() {
            return Err(RecommendError::NoProviders);
        }

        Self::sort(&mut scored, request.priority);
        let summary = SummaryBuilder::summarize(&scored);
        let best = scored[0].clone();

        debug!(
            best = %best.provider,
            priority = %request.priority,
            total_providers = summary.total_providers,
            "Providers ranked"
        );

        Ok(RecommendationResult {
            best,
            providers: scored,
            summary,
            priority: request.priority,
            warnings: normalization
                .warning(&request.source_currency)
                .into_iter()
                .collect(),
        })
    }

    /// Scores every provider in table order.
    ///
    /// Providers whose figures overflow are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RateUnavailable` if the request amount itself overflows
    /// when converted to USD or to the destination currency.
    pub fn score_all(
        providers: &[ProviderRecord],
        request: &TransferRequest,
        rate: Decimal,
        normalization: &UsdNormalization,
    ) -> Result<Vec<ScoredProvider>, RecommendError> {
        let out_of_range = || {
            RecommendError::rate_unavailable(
                &request.source_currency,
                &request.dest_currency,
                "amount is out of range at this rate",
            )
        };
        let amount_usd = normalization
            .amount_usd(request.amount)
            .ok_or_else(out_of_range)?;
        let destination_amount = request.amount.checked_mul(rate).ok_or_else(out_of_range)?;

        Ok(providers
            .iter()
            .filter_map(|provider| {
                let Some(score) = CostModel::score(provider, request.amount, amount_usd, rate)
                else {
                    warn!(provider = %provider.name, "Provider score overflowed, skipping");
                    return None;
                };
                Some(ScoredProvider {
                    provider: provider.name.clone(),
                    total_cost: score.total_cost,
                    avg_speed_hours: score.avg_speed_hours,
                    destination_amount,
                    exchange_rate: rate,
                    fees: score.fees,
                    source_currency: request.source_currency.clone(),
                    dest_currency: request.dest_currency.clone(),
                })
            })
            .collect())
    }

    /// Stable ascending sort by the priority's key. Ties keep table order.
    pub fn sort(scored: &mut [ScoredProvider], priority: Priority) {
        match priority {
            Priority::Cost => scored.sort_by_key(|s| s.total_cost),
            Priority::Speed => scored.sort_by_key(|s| s.avg_speed_hours),
        }
    }
}
