//! Open Exchange Rates client.
//!
//! Implements [`RateSource`] against the `latest.json` endpoint. Every call
//! is bounded by a request timeout and retried a limited number of times on
//! timeouts, transport failures and 5xx responses.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use sendwise_core::currency::{BASE_CURRENCY, RateSource, RateSourceError, RateTable};
use sendwise_shared::RatesConfig;

/// Client for the Open Exchange Rates `latest.json` endpoint.
pub struct OpenExchangeRates {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    max_retries: u32,
}

impl fmt::Debug for OpenExchangeRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenExchangeRates")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl OpenExchangeRates {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, RateSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RateSourceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
            max_retries,
        })
    }

    /// Creates a client from the `rates` config section.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &RatesConfig) -> Result<Self, RateSourceError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )
    }

    /// Base URL the client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_once(&self, symbols: &[String]) -> Result<RateTable, RateSourceError> {
        let url = format!("{}/latest.json", self.base_url);
        let mut query = vec![
            ("app_id", self.api_key.clone()),
            ("base", BASE_CURRENCY.to_string()),
        ];
        if !symbols.is_empty() {
            query.push(("symbols", symbols.join(",")));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(RateSourceError::Status {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        let payload: LatestResponse = serde_json::from_slice(&body)
            .map_err(|e| RateSourceError::Decode(e.to_string()))?;

        if payload.error {
            return Err(RateSourceError::Status {
                status: payload.status.unwrap_or(status.as_u16()),
                message: payload
                    .description
                    .or(payload.message)
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let rates = payload
            .rates
            .ok_or_else(|| RateSourceError::Decode("response has no rates".to_string()))?;

        let mut table = RateTable::from_quotes(rates);
        if let Some(ts) = payload.timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
            table = table.with_timestamp(ts);
        }
        Ok(table)
    }

    /// Maps a reqwest error, dropping the URL since it carries the app id.
    fn classify(&self, err: reqwest::Error) -> RateSourceError {
        if err.is_timeout() {
            RateSourceError::Timeout(self.timeout)
        } else if err.is_decode() {
            RateSourceError::Decode(err.without_url().to_string())
        } else {
            RateSourceError::Transport(err.without_url().to_string())
        }
    }
}

/// Body of `latest.json`, success or error.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    error: bool,
    status: Option<u16>,
    message: Option<String>,
    description: Option<String>,
    timestamp: Option<i64>,
    rates: Option<BTreeMap<String, Decimal>>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    description: Option<String>,
}

fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed.description.or(parsed.message)
}

#[async_trait]
impl RateSource for OpenExchangeRates {
    fn name(&self) -> &str {
        "openexchangerates"
    }

    async fn latest(&self, symbols: &[String]) -> Result<RateTable, RateSourceError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(symbols).await {
                Ok(table) => {
                    debug!(symbols = ?symbols, quotes = table.len(), "Fetched latest rates");
                    return Ok(table);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        error = %e,
                        attempt,
                        max_retries = self.max_retries,
                        "Rate request failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use rust_decimal_macros::dec;
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn client(base_url: &str, max_retries: u32) -> OpenExchangeRates {
        OpenExchangeRates::new(base_url, "test-key", Duration::from_millis(500), max_retries)
            .unwrap()
    }

    fn symbols(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| (*c).to_string()).collect()
    }

    #[tokio::test]
    async fn test_decodes_latest_rates() {
        let router = Router::new().route(
            "/api/latest.json",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["app_id"], "test-key");
                assert_eq!(params["base"], "USD");
                assert_eq!(params["symbols"], "EUR,GBP");
                Json(json!({
                    "disclaimer": "Usage subject to terms",
                    "timestamp": 1_700_000_000,
                    "base": "USD",
                    "rates": {"EUR": 0.92, "GBP": 0.79}
                }))
            }),
        );
        let url = serve(router).await;

        let table = client(&url, 0).latest(&symbols(&["EUR", "GBP"])).await.unwrap();

        assert_eq!(table.get("EUR"), Some(dec!(0.92)));
        assert_eq!(table.get("GBP"), Some(dec!(0.79)));
        assert_eq!(table.timestamp().map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[tokio::test]
    async fn test_no_symbols_omits_parameter() {
        let router = Router::new().route(
            "/api/latest.json",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert!(!params.contains_key("symbols"));
                Json(json!({"rates": {"EUR": 0.9, "JPY": 150}}))
            }),
        );
        let url = serve(router).await;

        let table = client(&url, 0).latest(&[]).await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.timestamp(), None);
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/api/latest.json",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                        StatusCode::BAD_GATEWAY.into_response()
                    } else {
                        Json(json!({"rates": {"EUR": 0.9}})).into_response()
                    }
                }),
            )
            .with_state(hits.clone());
        let url = serve(router).await;

        let table = client(&url, 1).latest(&symbols(&["EUR"])).await.unwrap();

        assert_eq!(table.get("EUR"), Some(dec!(0.9)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/api/latest.json",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    StatusCode::SERVICE_UNAVAILABLE
                }),
            )
            .with_state(hits.clone());
        let url = serve(router).await;

        let err = client(&url, 2).latest(&symbols(&["EUR"])).await.unwrap_err();

        assert!(matches!(err, RateSourceError::Status { status: 503, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route(
                "/api/latest.json",
                get(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({
                            "error": true,
                            "status": 401,
                            "message": "invalid_app_id",
                            "description": "Invalid App ID provided."
                        })),
                    )
                }),
            )
            .with_state(hits.clone());
        let url = serve(router).await;

        let err = client(&url, 3).latest(&[]).await.unwrap_err();

        assert_eq!(
            err,
            RateSourceError::Status {
                status: 401,
                message: "Invalid App ID provided.".to_string(),
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let router = Router::new().route(
            "/api/latest.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"rates": {}}))
            }),
        );
        let url = serve(router).await;

        let err = client(&url, 0).latest(&[]).await.unwrap_err();
        assert_eq!(err, RateSourceError::Timeout(Duration::from_millis(500)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route("/api/latest.json", get(|| async { "not json" }));
        let url = serve(router).await;

        let err = client(&url, 1).latest(&[]).await.unwrap_err();
        assert!(matches!(err, RateSourceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"), 0).latest(&[]).await.unwrap_err();
        match err {
            RateSourceError::Transport(message) => assert!(!message.contains("test-key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = client("https://openexchangerates.org/api/", 1);
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-key"));
        assert_eq!(client.base_url(), "https://openexchangerates.org/api");
    }
}
