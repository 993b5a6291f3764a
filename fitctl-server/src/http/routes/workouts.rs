//! Workout session endpoints, including the lookup by member name

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::db::repos::{NamedWorkouts, WorkoutRepo, WorkoutSession};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonPayload, RecordId};
use crate::http::server::{AppState, LookupMode};
use crate::models::WorkoutInput;

/// Workout session response
#[derive(Serialize)]
pub struct WorkoutSessionResponse {
    pub session_id: i64,
    pub member_id: Option<i64>,
    pub session_date: String,
    pub session_time: String,
    pub activity: String,
}

impl From<WorkoutSession> for WorkoutSessionResponse {
    fn from(w: WorkoutSession) -> Self {
        Self {
            session_id: w.session_id,
            member_id: w.member_id,
            session_date: w.session_date.format("%Y-%m-%d").to_string(),
            session_time: w.session_time,
            activity: w.activity,
        }
    }
}

/// Query for the name lookup
#[derive(Debug, Deserialize)]
pub struct ByNameParams {
    pub name: Option<String>,
}

fn respond(sessions: Vec<WorkoutSession>) -> Json<Vec<WorkoutSessionResponse>> {
    Json(sessions.into_iter().map(WorkoutSessionResponse::from).collect())
}

/// GET /workoutsessions - list all sessions
async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WorkoutSessionResponse>>, ApiError> {
    let sessions = WorkoutRepo::new(&state.pool).list().await?;
    Ok(respond(sessions))
}

/// POST /workoutsessions - schedule a session
async fn schedule_workout(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let input = WorkoutInput::from_json(&payload)?;
    WorkoutRepo::new(&state.pool).create(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("workout successfully scheduled")),
    ))
}

/// PUT /workoutsessions/{session_id} - replace all four fields
async fn update_workout(
    State(state): State<Arc<AppState>>,
    RecordId(session_id): RecordId,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = WorkoutRepo::new(&state.pool);
    repo.get(session_id).await?;

    let input = WorkoutInput::from_json(&payload)?;
    repo.update(session_id, &input).await?;

    Ok(Json(MessageResponse::new(
        "workout session details successfully updated",
    )))
}

/// GET /members/workouts-by-name?name=X - sessions of the first member
/// with this exact name
///
/// An empty result is a 404. Whether an unknown name is told apart from a
/// member without sessions depends on [`LookupMode`].
async fn workouts_by_member_name(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ByNameParams>,
) -> Result<Json<Vec<WorkoutSessionResponse>>, ApiError> {
    let Some(name) = params.name else {
        return Err(miss(state.lookup));
    };

    match WorkoutRepo::new(&state.pool).find_by_member_name(&name).await? {
        NamedWorkouts::Found(sessions) if !sessions.is_empty() => Ok(respond(sessions)),
        NamedWorkouts::Found(_) => Err(ApiError::WorkoutsNotFound),
        NamedWorkouts::UnknownMember => Err(miss(state.lookup)),
    }
}

/// Error for a lookup that matched no member.
fn miss(lookup: LookupMode) -> ApiError {
    match lookup {
        LookupMode::Conflated => ApiError::WorkoutsNotFound,
        LookupMode::Distinct => ApiError::MemberNotFound,
    }
}

/// Workout session routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/workoutsessions",
            get(list_sessions).post(schedule_workout),
        )
        .route("/workoutsessions/{session_id}", put(update_workout))
        .route("/members/workouts-by-name", get(workouts_by_member_name))
}
