//! Recommendation service.
//!
//! Ties the pure ranking engine to a [`RateSource`]. Holds the process-wide
//! provider table, which is never mutated after construction.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::currency::{BASE_CURRENCY, RateConverter, RateSource};
use crate::error::RecommendError;
use crate::ranking::{
    ProviderRecord, RankingEngine, RecommendationResult, TransferRequest, UsdNormalization,
};

/// Rates quoted against an arbitrary base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateSnapshot {
    /// Base currency code.
    pub base: String,
    /// Publication time reported by the source.
    pub timestamp: Option<DateTime<Utc>>,
    /// Units of each currency per 1 unit of `base`.
    pub rates: BTreeMap<String, Decimal>,
}

/// Answers transfer requests against a live rate source.
pub struct RecommendationService {
    providers: Arc<[ProviderRecord]>,
    rate_source: Arc<dyn RateSource>,
}

impl RecommendationService {
    /// Creates the service.
    pub fn new(
        providers: impl Into<Arc<[ProviderRecord]>>,
        rate_source: Arc<dyn RateSource>,
    ) -> Self {
        Self {
            providers: providers.into(),
            rate_source,
        }
    }

    /// The provider table.
    #[must_use]
    pub fn providers(&self) -> &[ProviderRecord] {
        &self.providers
    }

    /// Name of the configured rate source.
    #[must_use]
    pub fn rate_source_name(&self) -> &str {
        self.rate_source.name()
    }

    /// Recommends a provider for `request`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for identical currencies, before any rate lookup.
    /// - `RateUnavailable` if the rate source fails or lacks a currency.
    /// - `NoProviders` if no provider produces a valid score.
    pub async fn recommend(
        &self,
        request: &TransferRequest,
    ) -> Result<RecommendationResult, RecommendError> {
        let source = request.source_currency.as_str();
        let dest = request.dest_currency.as_str();
        RateConverter::ensure_distinct(source, dest)?;

        let symbols = RateConverter::required_symbols(source, dest);
        let usd_rates = self
            .rate_source
            .latest(&symbols)
            .await
            .map_err(|e| RecommendError::rate_unavailable(source, dest, e.to_string()))?;

        let rate = RateConverter::resolve_rate(source, dest, &usd_rates)?;
        debug!(source, dest, %rate, "Exchange rate resolved");

        let normalization = self.normalize_amount(source).await;
        let result = RankingEngine::rank(&self.providers, request, rate, &normalization)?;

        info!(
            source,
            dest,
            amount = %request.amount,
            priority = %request.priority,
            best = %result.best.provider,
            savings = %result.summary.savings,
            "Recommendation computed"
        );

        Ok(result)
    }

    /// Looks up how many `source_currency` units make 1 USD.
    ///
    /// Failure is not fatal: the raw amount is used as a USD stand-in and
    /// the result carries a warning.
    pub async fn normalize_amount(&self, source_currency: &str) -> UsdNormalization {
        if source_currency == BASE_CURRENCY {
            return UsdNormalization::Native;
        }

        let reason = match self.rate_source.latest(&[source_currency.to_string()]).await {
            Ok(table) => match table.get(source_currency) {
                Some(usd_rate) => return UsdNormalization::Converted { usd_rate },
                None => format!("currency {source_currency} not found in rates"),
            },
            Err(e) => e.to_string(),
        };

        warn!(
            source_currency,
            rate_source = self.rate_source.name(),
            reason = %reason,
            "USD normalization failed, treating amount as USD"
        );
        UsdNormalization::Fallback { reason }
    }

    /// Latest rates quoted against `base`, optionally limited to `symbols`.
    ///
    /// # Errors
    ///
    /// Returns `RateUnavailable` if the source fails or does not know `base`.
    pub async fn rates(
        &self,
        base: &str,
        symbols: &[String],
    ) -> Result<RateSnapshot, RecommendError> {
        let mut wanted = Vec::new();
        if !symbols.is_empty() {
            wanted.extend(symbols.iter().cloned());
            if base != BASE_CURRENCY && !wanted.iter().any(|s| s == base) {
                wanted.push(base.to_string());
            }
        }

        let usd_rates = self
            .rate_source
            .latest(&wanted)
            .await
            .map_err(|e| RecommendError::rate_unavailable(base, "*", e.to_string()))?;

        let mut rates = RateConverter::rebase(&usd_rates, base)?;
        if !symbols.is_empty() {
            rates.retain(|code, _| symbols.iter().any(|s| s == code));
        }

        Ok(RateSnapshot {
            base: base.to_string(),
            timestamp: usd_rates.timestamp(),
            rates,
        })
    }
}
