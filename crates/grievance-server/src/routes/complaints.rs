//! Complaint routes, mounted at `/api/complaints`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use grievance_core::model::{Complaint, ComplaintStatus, NewComplaint};
use grievance_core::PortalError;

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::db::{db_err, COMPLAINTS};
use crate::routes::ApiError;

/// Upper bound on a single listing.
const LIST_LIMIT: i64 = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(fetch))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Complaint>>, ApiError> {
    let db = state.db()?;
    let cursor = db
        .collection::<Complaint>(COMPLAINTS)
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .limit(LIST_LIMIT)
        .await
        .map_err(db_err)?;
    let complaints: Vec<Complaint> = cursor.try_collect().await.map_err(db_err)?;
    Ok(Json(complaints))
}

async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<NewComplaint>,
) -> Result<(StatusCode, Json<Complaint>), ApiError> {
    body.validate()?;
    let db = state.db()?;
    let created_by = ObjectId::parse_str(&user.id)
        .map_err(|_| PortalError::Internal("token carries malformed user id".into()))?;

    let mut complaint = Complaint {
        id: None,
        title: body.title,
        description: body.description,
        status: ComplaintStatus::Open,
        created_by,
        created_at: bson::DateTime::now(),
    };
    let inserted = db
        .collection::<Complaint>(COMPLAINTS)
        .insert_one(&complaint)
        .await
        .map_err(db_err)?;
    complaint.id = inserted.inserted_id.as_object_id();

    tracing::info!(user = %user.email, "complaint filed");
    Ok((StatusCode::CREATED, Json(complaint)))
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Complaint>, ApiError> {
    let oid = ObjectId::parse_str(&id)
        .map_err(|_| PortalError::BadRequest(format!("not a valid complaint id: {id}")))?;
    let db = state.db()?;
    let complaint = db
        .collection::<Complaint>(COMPLAINTS)
        .find_one(doc! { "_id": oid })
        .await
        .map_err(db_err)?
        .ok_or_else(|| PortalError::NotFound(format!("complaint {id}")))?;
    Ok(Json(complaint))
}
