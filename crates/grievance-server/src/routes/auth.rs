//! Auth routes, mounted at `/api/auth`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use mongodb::bson::doc;
use serde::Serialize;

use grievance_core::model::{Credentials, User};
use grievance_core::PortalError;

use crate::app_state::AppState;
use crate::auth::{hash_password, verify_password};
use crate::db::{db_err, USERS};
use crate::routes::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Debug, Serialize)]
struct RegisteredUser {
    id: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
    token_type: &'static str,
    expires_in: u64,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<RegisteredUser>), ApiError> {
    body.validate()?;
    let db = state.db()?;
    let users = db.collection::<User>(USERS);

    let existing = users
        .find_one(doc! { "email": body.email.clone() })
        .await
        .map_err(db_err)?;
    if existing.is_some() {
        return Err(PortalError::Conflict("email already registered".into()).into());
    }

    let user = User {
        id: None,
        email: body.email,
        password_hash: hash_password(&body.password)?,
        created_at: bson::DateTime::now(),
    };
    let inserted = users.insert_one(&user).await.map_err(db_err)?;
    let id = inserted
        .inserted_id
        .as_object_id()
        .ok_or_else(|| PortalError::Internal("insert returned non-ObjectId".into()))?;

    tracing::info!(user = %id.to_hex(), "registered new user");
    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id: id.to_hex(),
            email: user.email,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    let db = state.db()?;
    let users = db.collection::<User>(USERS);

    let user = users
        .find_one(doc! { "email": body.email.clone() })
        .await
        .map_err(db_err)?
        .ok_or(PortalError::AuthFailed)?;
    verify_password(&body.password, &user.password_hash)?;

    let token = state.tokens().issue(&user)?;
    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer",
        expires_in: state.tokens().ttl_secs(),
    }))
}
