//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod health;
pub mod rates;
pub mod recommend;

/// Routes mounted at the server root.
pub fn root_routes() -> Router<AppState> {
    health::root_routes()
}

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(recommend::routes())
        .merge(rates::routes())
}

/// Trims and upper-cases a currency code. Blank input yields `None`.
pub(crate) fn normalize_currency(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_ascii_uppercase)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    use sendwise_core::RecommendationService;
    use sendwise_core::currency::{RateTable, StaticRateSource};
    use sendwise_core::ranking::ProviderRecord;
    use sendwise_shared::CorsConfig;

    use crate::{AppState, create_router};

    pub fn providers() -> Vec<ProviderRecord> {
        vec![
            ProviderRecord {
                name: "A".to_string(),
                fixed_fee_min_usd: dec!(2),
                percentage_fee_min: dec!(1),
                percentage_fee_max: dec!(1),
                speed_min_hours: dec!(10),
                speed_max_hours: dec!(20),
                ..ProviderRecord::default()
            },
            ProviderRecord {
                name: "B".to_string(),
                percentage_fee_min: dec!(2),
                percentage_fee_max: dec!(2),
                speed_min_hours: dec!(1),
                speed_max_hours: dec!(2),
                ..ProviderRecord::default()
            },
        ]
    }

    pub fn rate_table() -> RateTable {
        RateTable::from_quotes([("EUR", dec!(1)), ("GBP", dec!(0.5)), ("NGN", dec!(1500))])
    }

    pub fn app_with(source: StaticRateSource) -> Router {
        let service = RecommendationService::new(providers(), Arc::new(source));
        create_router(AppState::new(service), &CorsConfig::default())
    }

    pub fn app() -> Router {
        app_with(StaticRateSource::new(rate_table()))
    }

    pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }
}
