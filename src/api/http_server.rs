// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::predict::predict_handler;
use crate::classifier::ImageClassifier;
use crate::config::ServerConfig;

/// Shared state handed to every request handler
///
/// Holds the classifier loaded at startup. Cloning only bumps the `Arc`;
/// the model itself is never copied or mutated.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn ImageClassifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn ImageClassifier>) -> Self {
        Self { classifier }
    }
}

/// Build the router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/predict/", post(predict_handler))
        // Uploads of any size are accepted
        .layer(DefaultBodyLimit::disable())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS that still allows credentialed browser requests
///
/// Credentials cannot be combined with a literal `*`, so the request's
/// origin and headers are echoed back instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Bind the configured address and serve until Ctrl-C
pub async fn start_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
