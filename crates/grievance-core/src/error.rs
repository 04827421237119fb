//! Shared error type across grievance crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Auth failed.
    AuthFailed,
    /// Resource does not exist.
    NotFound,
    /// Resource already exists.
    Conflict,
    /// Backing store unreachable.
    Unavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PortalError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PortalError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PortalError::BadRequest(_) => ClientCode::BadRequest,
            PortalError::AuthFailed => ClientCode::AuthFailed,
            PortalError::NotFound(_) => ClientCode::NotFound,
            PortalError::Conflict(_) => ClientCode::Conflict,
            PortalError::Unavailable(_) => ClientCode::Unavailable,
            PortalError::Internal(_) => ClientCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_codes_are_stable() {
        assert_eq!(
            PortalError::BadRequest("x".into()).client_code().as_str(),
            "BAD_REQUEST"
        );
        assert_eq!(PortalError::AuthFailed.client_code().as_str(), "AUTH_FAILED");
        assert_eq!(
            PortalError::Unavailable("db".into()).client_code().as_str(),
            "UNAVAILABLE"
        );
    }
}
