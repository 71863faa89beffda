//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - CORS and request tracing layers
//! - JSON error responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use sendwise_core::RecommendationService;
use sendwise_shared::CorsConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Recommendation service holding the provider table and rate source.
    pub service: Arc<RecommendationService>,
}

impl AppState {
    /// Wraps a service.
    #[must_use]
    pub fn new(service: RecommendationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .merge(routes::root_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(cors))
        .with_state(state)
}

/// Builds the CORS layer for the configured origins.
///
/// Credentials are allowed, so methods and headers mirror the request
/// instead of using a wildcard.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
