//! Mounted API sub-routers and their shared response plumbing.

pub mod auth;
pub mod complaints;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use grievance_core::error::ClientCode;
use grievance_core::PortalError;

/// Handler-level error: maps the shared error type onto an HTTP response
/// with a stable code and a JSON body.
#[derive(Debug)]
pub struct ApiError(pub PortalError);

impl From<PortalError> for ApiError {
    fn from(e: PortalError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::AuthFailed => StatusCode::UNAUTHORIZED,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::Conflict => StatusCode::CONFLICT,
            ClientCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Internal detail stays in logs; clients get the stable code.
        let message = match code {
            ClientCode::Internal => "internal server error".to_string(),
            _ => self.0.to_string(),
        };
        let body = Json(json!({ "error": code.as_str(), "message": message }));
        (status, body).into_response()
    }
}
