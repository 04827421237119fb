//! Axum router wiring.
//!
//! API routes and ops endpoints, with the static directory as fallback. The
//! request-tracking layer is added last so it wraps everything, including
//! the fallback, and CORS sits outside of that.

use axum::http::HeaderValue;
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::{app_state::AppState, obs, ops, routes};

pub fn build_router(state: AppState) -> Router {
    let cors = build_cors(&state.cfg().cors.allowed_origins);
    let static_dir = ServeDir::new(&state.cfg().server.static_dir);

    Router::new()
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .nest("/api/auth", routes::auth::router())
        .nest("/api/complaints", routes::complaints::router())
        .fallback_service(static_dir)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            obs::middleware::track_requests,
        ))
        .layer(cors)
        .with_state(state)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
