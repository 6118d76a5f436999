// GET /api/health and GET /api/thresholds.
//
// Health is an unconditional 200 for load balancers. Thresholds lets a front
// end show the limits next to the scores without hardcoding them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

/// Health check: always returns 200 OK.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok", "service": "CopyMind API" })),
    )
}

/// GET /api/thresholds: the active gate settings.
pub async fn get_thresholds(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.gate.config();
    Json(serde_json::json!({
        "thresholds": config.thresholds,
        "ngramSize": config.ngram_size,
        "embeddingModel": state.gate.semantic_model(),
    }))
}
