//! HTTP relay exposing keyword generation, prompt generation and the
//! OpenRouter model catalog.

pub mod error;
pub mod handlers;
pub mod headers;

use crate::ai::ProviderFactory;
use crate::models::ServerConfig;
use crate::Result;
use axum::http::{header, HeaderName, Method};
use axum::routing::post;
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Immutable per-server state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub providers: ProviderFactory,
    pub prompt_delay: Duration,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            providers: ProviderFactory::from_config(config),
            prompt_delay: config.prompt_delay,
        }
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(headers::X_PROVIDER),
            HeaderName::from_static(headers::X_API_KEY),
            HeaderName::from_static(headers::X_MODEL),
        ])
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/keywords/generate", post(handlers::generate_keywords))
        .route("/api/prompts/generate", post(handlers::generate_prompts))
        .route(
            "/api/openrouter/models",
            post(handlers::list_openrouter_models),
        )
        .layer(cors_layer())
        .with_state(state)
}

/// Serves the relay on an already-bound listener until Ctrl-C.
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<()> {
    info!("Relay listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Binds `config.host:config.port` and serves the relay.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    serve_on(listener, AppState::from_config(config)).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
