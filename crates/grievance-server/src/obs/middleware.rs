//! Request-tracking middleware.
//!
//! Attached as the outermost layer so every request is observed no matter
//! which route (or the static fallback) ends up handling it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;

/// Count one completed request in `http_requests_total`.
///
/// Runs the rest of the stack to completion first: the status label is only
/// known once the response is final. The `route` label is the raw request
/// path, so parameterized paths produce one cell per concrete value —
/// unbounded label cardinality under adversarial traffic.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_owned();
    let route = request.uri().path().to_owned();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    state.http_requests().inc(&[&method, &route, &status]);
    response
}
