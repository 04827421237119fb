//! Token issuance and verification for the auth routes.
//!
//! HS256 with a shared secret from config. Hashing of stored passwords also
//! lives here so the route handlers stay thin.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use grievance_core::model::User;
use grievance_core::{PortalError, Result};

use crate::app_state::AppState;
use crate::config::AuthSection;
use crate::routes::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id (hex ObjectId).
    pub sub: String,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

/// Issues and verifies bearer tokens.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenSigner {
    pub fn new(cfg: &AuthSection) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            ttl_secs: cfg.token_ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        let id = user
            .id
            .ok_or_else(|| PortalError::Internal("user document missing _id".into()))?;
        let now = get_current_timestamp();
        let claims = Claims {
            sub: id.to_hex(),
            email: user.email.clone(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| PortalError::Internal(format!("token encode failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| PortalError::AuthFailed)
    }
}

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(PortalError::AuthFailed)?;
        let claims = state.tokens().verify(token)?;
        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PortalError::Internal(format!("password hash failed: {e}")))
}

/// Check a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed =
        PasswordHash::new(hash).map_err(|_| PortalError::Internal("corrupt password hash".into()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PortalError::AuthFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    fn test_user() -> User {
        User {
            id: Some(ObjectId::new()),
            email: "citizen@example.com".into(),
            password_hash: String::new(),
            created_at: bson::DateTime::now(),
        }
    }

    #[test]
    fn issue_then_verify_roundtrip() {
        let signer = TokenSigner::new(&AuthSection::default());
        let user = test_user();
        let token = signer.issue(&user).unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.sub, user.id.unwrap().to_hex());
    }

    #[test]
    fn verify_rejects_foreign_secret() {
        let signer = TokenSigner::new(&AuthSection::default());
        let other = TokenSigner::new(&AuthSection {
            jwt_secret: "another-secret-key".into(),
            ..Default::default()
        });
        let token = other.issue(&test_user()).unwrap();
        assert!(matches!(signer.verify(&token), Err(PortalError::AuthFailed)));
    }

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }
}
