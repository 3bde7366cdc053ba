//! Meeting CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use meetnote_core::{CreateMeetingRequest, Meeting, UpdateMeetingRequest};

use crate::{ApiError, AppState};

/// Outcome of a delete call.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteMeetingResponse {
    /// False when no meeting had the id.
    pub deleted: bool,
}

/// List all meetings ordered by id.
#[utoipa::path(get, path = "/api/v1/meetings", tag = "Meetings",
    responses(
        (status = 200, description = "All meetings", body = [Meeting]),
    )
)]
pub async fn list_meetings(State(state): State<AppState>) -> Result<Json<Vec<Meeting>>, ApiError> {
    Ok(Json(state.meetings.list().await?))
}

/// Create a meeting.
#[utoipa::path(post, path = "/api/v1/meetings", tag = "Meetings",
    request_body = CreateMeetingRequest,
    responses(
        (status = 201, description = "Meeting created", body = Meeting),
        (status = 400, description = "Missing title"),
    )
)]
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(body): Json<CreateMeetingRequest>,
) -> Result<(StatusCode, Json<Meeting>), ApiError> {
    let meeting = state.meetings.insert(body).await?;
    info!(
        subsystem = "api",
        component = "meetings",
        op = "create",
        meeting_id = meeting.id,
        "Meeting created"
    );
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// Get one meeting.
#[utoipa::path(get, path = "/api/v1/meetings/{id}", tag = "Meetings",
    params(("id" = i32, Path, description = "Meeting id")),
    responses(
        (status = 200, description = "Meeting", body = Meeting),
        (status = 404, description = "No such meeting"),
    )
)]
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Meeting>, ApiError> {
    Ok(Json(state.meetings.fetch(id).await?))
}

/// Partially update a meeting. Only fields present in the body change.
#[utoipa::path(patch, path = "/api/v1/meetings/{id}", tag = "Meetings",
    params(("id" = i32, Path, description = "Meeting id")),
    request_body = UpdateMeetingRequest,
    responses(
        (status = 200, description = "Updated meeting", body = Meeting),
        (status = 400, description = "Empty title"),
        (status = 404, description = "No such meeting"),
    )
)]
pub async fn update_meeting(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateMeetingRequest>,
) -> Result<Json<Meeting>, ApiError> {
    let req = UpdateMeetingRequest { id, ..body };
    Ok(Json(state.meetings.update(req).await?))
}

/// Delete a meeting.
#[utoipa::path(delete, path = "/api/v1/meetings/{id}", tag = "Meetings",
    params(("id" = i32, Path, description = "Meeting id")),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteMeetingResponse),
    )
)]
pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteMeetingResponse>, ApiError> {
    let deleted = state.meetings.delete(id).await?;
    Ok(Json(DeleteMeetingResponse { deleted }))
}
