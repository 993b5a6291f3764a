//! Member endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use super::MessageResponse;
use crate::db::repos::{Member, MemberRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonPayload, RecordId};
use crate::http::server::AppState;
use crate::models::MemberInput;

/// Member response
#[derive(Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            name: m.name,
            age: m.age,
        }
    }
}

/// GET /members - list all members
async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = MemberRepo::new(&state.pool).list().await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// POST /members - add a member
async fn add_member(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let input = MemberInput::from_json(&payload)?;
    MemberRepo::new(&state.pool).create(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("new member added successfully")),
    ))
}

/// PUT /members/{id} - replace name and age
///
/// The member is looked up before the body is validated, so an unknown id
/// answers 404 whatever the payload.
async fn update_member(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = MemberRepo::new(&state.pool);
    repo.get(id).await?;

    let input = MemberInput::from_json(&payload)?;
    repo.update(id, &input).await?;

    Ok(Json(MessageResponse::new("Member details updated successfully")))
}

/// DELETE /members/{id} - remove a member
async fn delete_member(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = MemberRepo::new(&state.pool);
    repo.get(id).await?;
    repo.delete(id).await?;

    Ok(Json(MessageResponse::new("Member removed successfully")))
}

/// Member routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/members", get(list_members).post(add_member))
        .route("/members/{id}", put(update_member).delete(delete_member))
}
