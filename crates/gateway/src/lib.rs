//! HTTP API for Emoteport.
//!
//! Read-only JSON endpoints: channel identity, merged emotes, chat badges
//! and channel search, plus index and health probes.
//!
//! Built on Axum; the service is shared across requests behind an `Arc`.

pub mod error;
pub mod users;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    response::Json,
    routing::get,
};
use emoteport_aggregator::UserService;
use emoteport_config::AppConfig;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;
pub use users::SharedService;

/// Build the full router.
///
/// Layers applied:
/// - CORS restricted to `cors_origins`
/// - HTTP trace logging
pub fn build_router(service: SharedService, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .merge(users::users_router(service))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Start the HTTP server and run until Ctrl-C.
///
/// Builds the provider set once; missing Twitch credentials fail here,
/// before anything binds.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let providers = emoteport_providers::build_from_config(&config)?;
    let service = Arc::new(UserService::from_providers(providers, &config));

    let app = build_router(service, &config.gateway.cors_origins);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Emoteport API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Emoteport API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown requested");
}

// --- Handlers ---

#[derive(Serialize)]
struct IndexResponse {
    message: &'static str,
}

async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Emoteport API",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
