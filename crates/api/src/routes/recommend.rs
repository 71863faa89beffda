//! Provider recommendation route.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sendwise_core::ranking::{
    Priority, RecommendationResult, ScoredProvider, Summary, TransferRequest,
};

use super::normalize_currency;
use crate::AppState;
use crate::error::ApiError;

/// Largest accepted transfer amount (one trillion).
const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Creates the recommendation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/recommend", get(recommend))
}

/// Query parameters for a recommendation.
///
/// Every field is optional here so that missing values produce a JSON
/// validation error instead of a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    /// Amount to send, in the source currency.
    pub amount: Option<String>,
    /// Source currency code.
    pub source_currency: Option<String>,
    /// Destination currency code.
    pub dest_currency: Option<String>,
    /// `"cost"` (default) or `"speed"`.
    pub priority: Option<String>,
}

impl RecommendQuery {
    /// Validates the query into a transfer request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing field or an amount that is
    /// not positive or exceeds one trillion.
    pub fn into_request(self) -> Result<TransferRequest, ApiError> {
        let raw_amount = self
            .amount
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| missing("amount"))?;
        let amount = Decimal::from_str(raw_amount)
            .or_else(|_| Decimal::from_scientific(raw_amount))
            .map_err(|_| ApiError::validation(format!("Invalid amount: {raw_amount}")))?;
        if amount <= Decimal::ZERO {
            return Err(ApiError::validation("Amount must be greater than zero"));
        }
        if amount > MAX_AMOUNT {
            return Err(ApiError::validation(format!("Amount must not exceed {MAX_AMOUNT}")));
        }

        let source_currency = normalize_currency(self.source_currency.as_deref())
            .ok_or_else(|| missing("source_currency"))?;
        let dest_currency = normalize_currency(self.dest_currency.as_deref())
            .ok_or_else(|| missing("dest_currency"))?;
        let priority = self
            .priority
            .as_deref()
            .map_or(Priority::Cost, |p| Priority::parse_lenient(p.trim()));

        Ok(TransferRequest {
            amount,
            source_currency,
            dest_currency,
            priority,
        })
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::validation(format!("Missing required parameter: {field}"))
}

/// One ranked provider, keyed as the frontend expects.
#[derive(Debug, Serialize)]
pub struct ProviderResponse {
    /// Provider name.
    #[serde(rename = "Provider")]
    pub provider: String,
    /// Projected total cost in the destination currency.
    #[serde(rename = "Total_Cost", with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    /// Midpoint of the delivery window in hours.
    #[serde(rename = "Avg_Speed_Hours", with = "rust_decimal::serde::float")]
    pub avg_speed_hours: Decimal,
    /// Amount times the unmarked-up rate.
    #[serde(rename = "Destination_Amount", with = "rust_decimal::serde::float")]
    pub destination_amount: Decimal,
    /// Unmarked-up rate used.
    #[serde(rename = "Exchange_Rate", with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
    /// Indicative fee figure.
    #[serde(rename = "Fees", with = "rust_decimal::serde::float")]
    pub fees: Decimal,
    /// Source currency code.
    #[serde(rename = "Source_Currency")]
    pub source_currency: String,
    /// Destination currency code.
    #[serde(rename = "Dest_Currency")]
    pub dest_currency: String,
}

impl From<ScoredProvider> for ProviderResponse {
    fn from(scored: ScoredProvider) -> Self {
        Self {
            provider: scored.provider,
            total_cost: scored.total_cost,
            avg_speed_hours: scored.avg_speed_hours,
            destination_amount: scored.destination_amount,
            exchange_rate: scored.exchange_rate,
            fees: scored.fees,
            source_currency: scored.source_currency,
            dest_currency: scored.dest_currency,
        }
    }
}

/// Savings statistics.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Highest total cost.
    #[serde(with = "rust_decimal::serde::float")]
    pub baseline_cost: Decimal,
    /// Lowest total cost.
    #[serde(with = "rust_decimal::serde::float")]
    pub best_cost: Decimal,
    /// `baseline_cost - best_cost`.
    #[serde(with = "rust_decimal::serde::float")]
    pub savings: Decimal,
    /// Savings as a percentage of the baseline.
    #[serde(with = "rust_decimal::serde::float")]
    pub savings_percentage: Decimal,
    /// Number of providers scored.
    pub total_providers: usize,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        Self {
            baseline_cost: summary.baseline_cost,
            best_cost: summary.best_cost,
            savings: summary.savings,
            savings_percentage: summary.savings_percentage,
            total_providers: summary.total_providers,
        }
    }
}

/// Response for GET `/recommend`.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    /// Winning provider.
    pub best: ProviderResponse,
    /// All providers, best first.
    pub providers: Vec<ProviderResponse>,
    /// Savings statistics.
    pub summary: SummaryResponse,
    /// Priority applied.
    pub priority: Priority,
    /// Non-fatal problems, such as a failed USD normalization.
    pub warnings: Vec<String>,
}

impl From<RecommendationResult> for RecommendResponse {
    fn from(result: RecommendationResult) -> Self {
        Self {
            best: result.best.into(),
            providers: result.providers.into_iter().map(Into::into).collect(),
            summary: result.summary.into(),
            priority: result.priority,
            warnings: result.warnings,
        }
    }
}

/// GET `/recommend` - Rank providers for a transfer.
async fn recommend(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let request = query.into_request()?;
    let result = state.service.recommend(&request).await?;
    Ok(Json(result.into()))
}
