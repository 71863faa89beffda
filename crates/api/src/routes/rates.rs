//! Live exchange rate lookup route.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sendwise_core::currency::BASE_CURRENCY;
use sendwise_core::service::RateSnapshot;

use super::normalize_currency;
use crate::AppState;
use crate::error::ApiError;

/// Creates the rate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rates", get(get_rates))
}

/// Query parameters for a rate lookup.
#[derive(Debug, Default, Deserialize)]
pub struct RatesQuery {
    /// Base currency (defaults to USD).
    pub base: Option<String>,
    /// Comma-separated currency codes to keep.
    pub symbols: Option<String>,
}

/// A rate rendered as a JSON number.
#[derive(Debug, Serialize)]
pub struct RateValue(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

/// Response for GET `/rates`.
#[derive(Debug, Serialize)]
pub struct RatesResponse {
    /// Base currency code.
    pub base: String,
    /// Publication time reported by the rate source.
    pub timestamp: Option<DateTime<Utc>>,
    /// Units of each currency per 1 unit of `base`.
    pub rates: BTreeMap<String, RateValue>,
}

impl From<RateSnapshot> for RatesResponse {
    fn from(snapshot: RateSnapshot) -> Self {
        Self {
            base: snapshot.base,
            timestamp: snapshot.timestamp,
            rates: snapshot
                .rates
                .into_iter()
                .map(|(code, rate)| (code, RateValue(rate)))
                .collect(),
        }
    }
}

/// GET `/rates` - Latest rates against a base currency.
async fn get_rates(
    State(state): State<AppState>,
    Query(query): Query<RatesQuery>,
) -> Result<Json<RatesResponse>, ApiError> {
    let base = normalize_currency(query.base.as_deref())
        .unwrap_or_else(|| BASE_CURRENCY.to_string());
    let symbols: Vec<String> = query
        .symbols
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(|code| normalize_currency(Some(code)))
        .collect();

    let snapshot = state.service.rates(&base, &symbols).await?;
    Ok(Json(snapshot.into()))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, get_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_defaults_to_usd_base() {
        let (status, body) = get_json(app(), "/api/v1/rates").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["base"], "USD");
        assert_eq!(body["rates"]["NGN"], json!(1500.0));
        assert_eq!(body["rates"].as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rebases_and_filters_symbols() {
        let (status, body) = get_json(app(), "/api/v1/rates?base=eur&symbols=gbp,%20ngn").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["base"], "EUR");
        assert_eq!(
            body["rates"],
            json!({"GBP": 0.5, "NGN": 1500.0})
        );
    }

    #[tokio::test]
    async fn test_usd_is_quoted_for_other_bases() {
        let (_, body) = get_json(app(), "/api/v1/rates?base=GBP&symbols=USD").await;
        assert_eq!(body["rates"], json!({"USD": 2.0}));
    }

    #[tokio::test]
    async fn test_unknown_base_is_not_found() {
        let (status, body) = get_json(app(), "/api/v1/rates?base=XYZ").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "RATE_UNAVAILABLE");
    }
}
