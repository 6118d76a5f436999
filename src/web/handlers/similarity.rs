// POST /check_similarity: score a rewrite against its original.
//
// Body: { "original": string, "rewritten": string }
// 200:  { "charOverlap", "jaccard", "semantic", "pass" }
// 400:  { "error": string } for missing/empty fields or a non-JSON body.
//
// Embedding provider failures never surface here; they only lower the
// semantic score to 0.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::similarity::gate::validate_pair;
use crate::web::{api_error, AppState};

/// Missing fields deserialize as empty so they hit the same validation path.
#[derive(Deserialize, Default)]
pub struct CheckRequest {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub rewritten: String,
}

/// POST /check_similarity: run the originality gate on one pair.
pub async fn check_similarity(
    State(state): State<AppState>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected check_similarity body");
            return api_error(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    if let Err(e) = validate_pair(&body.original, &body.rewritten) {
        return api_error(StatusCode::BAD_REQUEST, &e.to_string());
    }

    let report = state.gate.evaluate(&body.original, &body.rewritten).await;
    Json(report).into_response()
}
