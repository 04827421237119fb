//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness, used by orchestration probes
//! - `/metrics` : Prometheus text format

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::app_state::AppState;

/// Always `200 {"status":"UP"}`, independent of database connectivity.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "UP" }))
}

pub async fn metrics(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    let body = state.registry().render();

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
