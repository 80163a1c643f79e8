use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use agency_client::{DesignRushConfig, ScraperBackend};
use agency_server::config::ServerConfig;
use agency_server::routes;
use agency_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("agency=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let scraper = ScraperBackend::launch(config.backend, &DesignRushConfig::from_env()?).await?;
    tracing::info!(backend = %config.backend, auth = config.api_key.is_some(), "Scraper ready");

    let state = Arc::new(AppState::new(scraper, config.api_key.clone()));

    let app = routes::router(state)
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.addr();
    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
