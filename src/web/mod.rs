// Web server: Axum-based upload API.
//
// POST /analyze takes a multipart batch of documents and returns the ranked
// similarity report as JSON. GET / and GET /health are liveness probes.
//
// There is no shared mutable state: AppState only carries the immutable
// configuration, analyzer settings and extractor, so concurrent requests
// never contend.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::extract::traits::TextExtractor;
use crate::extract::DefaultExtractor;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<Analyzer>,
    pub extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    /// State backed by the default file-format extractor.
    pub fn new(config: Config) -> Self {
        Self::with_extractor(config, Arc::new(DefaultExtractor))
    }

    pub fn with_extractor(config: Config, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            analyzer: Arc::new(config.analyzer()),
            config: Arc::new(config),
            extractor,
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.bind_addr, config.port);
    let app = build_router(AppState::new(config));

    info!("Tracer API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/", get(handlers::status::home))
        .route("/health", get(handlers::status::health))
        .route("/analyze", post(handlers::analyze::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
