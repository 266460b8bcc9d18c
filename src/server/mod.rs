//! HTTP API for the coastal dashboard.

mod handlers;
mod state;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::alerts::AlertStore;
use crate::conditions::ConditionsService;
use crate::config::Config;

pub use state::AppState;

/// Shared state for a fresh server: sample alerts, provider per config.
pub fn state_from_config(config: &Config) -> Arc<AppState> {
    Arc::new(AppState::new(
        ConditionsService::from_config(config),
        config.default_location.clone(),
        AlertStore::with_samples(chrono::Utc::now()),
    ))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route("/api/locations", get(handlers::locations))
        .route("/api/resolve/{query}", get(handlers::resolve))
        .route("/api/data", get(handlers::data_default))
        .route("/api/data/{location}", get(handlers::data))
        .route("/api/demo/{location}", get(handlers::demo))
        .route("/api/alerts", get(handlers::alerts))
        .route("/api/alerts/{id}", axum::routing::delete(handlers::deactivate_alert))
        .route("/api/health", get(handlers::health))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(config: &Config) -> std::io::Result<()> {
    let app = build_router(state_from_config(config));
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        addr = %addr,
        live_weather = config.openweather_api_key.is_some(),
        live_tides = config.noaa_api_key.is_some(),
        "Coastwatch server listening; press Ctrl+C to stop"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
