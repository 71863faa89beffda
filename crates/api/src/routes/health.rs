//! Health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Human-readable status line.
    pub message: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Sendwise recommendation API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes under the API prefix.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Creates the root health route.
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, get_json};
    use axum::http::StatusCode;
    use rstest::rstest;

    #[rstest]
    #[case("/")]
    #[case("/api/v1/health")]
    #[tokio::test]
    async fn test_health(#[case] uri: &str) {
        let (status, body) = get_json(app(), uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
