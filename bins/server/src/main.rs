//! Sendwise API Server
//!
//! Main entry point for the Sendwise recommendation service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sendwise_api::{AppState, create_router};
use sendwise_catalog::ProviderCatalog;
use sendwise_core::RecommendationService;
use sendwise_rates::OpenExchangeRates;
use sendwise_shared::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(config.logging.format);

    // Load the provider table
    let catalog = ProviderCatalog::load(&config.providers.path)
        .with_context(|| format!("Failed to load providers from {}", config.providers.path))?;

    // Create the rate source
    let rate_source = OpenExchangeRates::from_config(&config.rates)
        .context("Failed to build exchange rate client")?;
    info!(
        base_url = %rate_source.base_url(),
        timeout_secs = config.rates.timeout_secs,
        max_retries = config.rates.max_retries,
        "Exchange rate client configured"
    );

    // Create application state
    let service = RecommendationService::new(catalog.into_providers(), Arc::new(rate_source));
    info!(
        providers = service.providers().len(),
        rate_source = service.rate_source_name(),
        "Recommendation service ready"
    );
    let state = AppState::new(service);

    // Create router
    let app = create_router(state, &config.cors);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sendwise=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
