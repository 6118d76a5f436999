// Web server: Axum-based JSON API around the originality gate.
//
// POST /check_similarity (and /api/check_similarity) scores one pair.
// GET  /api/health and /health report liveness.
// GET  /api/thresholds exposes the active gate settings.
//
// The gate is stateless; the only shared state is the immutable gate value
// (thresholds plus the embedding client), cloned into each handler.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::similarity::gate::OriginalityGate;

pub mod handlers;

/// Largest accepted request body (two full-length articles fit easily).
pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<OriginalityGate>,
}

impl AppState {
    pub fn new(gate: OriginalityGate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(gate: OriginalityGate, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState::new(gate));

    let addr = format!("{bind}:{port}");
    info!("copymind API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router with all routes and middleware attached.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/check_similarity",
            post(handlers::similarity::check_similarity),
        )
        .route(
            "/api/check_similarity",
            post(handlers::similarity::check_similarity),
        )
        .route("/api/thresholds", get(handlers::status::get_thresholds))
        .route("/api/health", get(handlers::status::health))
        .route("/health", get(handlers::status::health));

    api.layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
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
