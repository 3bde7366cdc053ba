//! Enhancement handlers.
//!
//! `POST /api/v1/enhance` returns the pipeline output without touching the
//! stored meeting. `POST /api/v1/enhance/apply` also merges the output into
//! the meeting and persists it.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use meetnote_core::{EnhanceType, EnhancementRequest, EnhancementResult, Meeting};

use crate::{ApiError, AppState};

/// Wire form of an enhancement request.
///
/// `enhance_type` stays a string so an unknown mode is reported as
/// `Unsupported enhancement type: ...` instead of a generic JSON rejection.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct EnhanceBody {
    pub meeting_id: i32,
    #[serde(default)]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub user_notes: Option<String>,
    /// One of `grammar`, `summary`, `action_items`, `full_enhancement`.
    pub enhance_type: String,
}

impl EnhanceBody {
    pub fn into_request(self) -> meetnote_core::Result<EnhancementRequest> {
        let enhance_type: EnhanceType = self.enhance_type.parse()?;
        Ok(EnhancementRequest {
            meeting_id: self.meeting_id,
            transcribed_text: self.transcribed_text,
            user_notes: self.user_notes,
            enhance_type,
        })
    }
}

/// Enhancement result together with the meeting it was merged into.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApplyEnhancementResponse {
    pub result: EnhancementResult,
    pub meeting: Meeting,
}

async fn run(
    state: &AppState,
    body: EnhanceBody,
) -> meetnote_core::Result<(EnhancementResult, Meeting)> {
    let meeting = state.meetings.fetch(body.meeting_id).await?;
    let req = body.into_request()?;
    let result = state.pipeline.enhance(&req, &meeting).await?;
    Ok((result, meeting))
}

/// Enhance a meeting's notes.
#[utoipa::path(post, path = "/api/v1/enhance", tag = "Enhancement",
    request_body = EnhanceBody,
    responses(
        (status = 200, description = "Enhancement result", body = EnhancementResult),
        (status = 400, description = "No content or unsupported enhancement type"),
        (status = 404, description = "No such meeting"),
    )
)]
pub async fn enhance_meeting(
    State(state): State<AppState>,
    Json(body): Json<EnhanceBody>,
) -> Result<Json<EnhancementResult>, ApiError> {
    let (result, _) = run(&state, body).await?;
    Ok(Json(result))
}

/// Enhance a meeting's notes and persist the merged result.
///
/// The fetch, merge and update are separate repository calls with no lock
/// held between them. Two concurrent applies on the same meeting both merge
/// into the same snapshot, so the later write drops the action items the
/// earlier one appended. Sequential applies accumulate.
#[utoipa::path(post, path = "/api/v1/enhance/apply", tag = "Enhancement",
    request_body = EnhanceBody,
    responses(
        (status = 200, description = "Result and updated meeting", body = ApplyEnhancementResponse),
        (status = 400, description = "No content or unsupported enhancement type"),
        (status = 404, description = "No such meeting"),
    )
)]
pub async fn apply_enhancement(
    State(state): State<AppState>,
    Json(body): Json<EnhanceBody>,
) -> Result<Json<ApplyEnhancementResponse>, ApiError> {
    let (result, meeting) = run(&state, body).await?;
    let meeting = state.meetings.update(result.to_update(&meeting)).await?;

    info!(
        subsystem = "api",
        component = "enhance",
        op = "apply",
        meeting_id = meeting.id,
        action_items = meeting.action_items.len(),
        "Enhancement applied"
    );
    Ok(Json(ApplyEnhancementResponse { result, meeting }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetnote_core::Error;

    #[test]
    fn test_into_request_parses_mode() {
        let body = EnhanceBody {
            meeting_id: 3,
            transcribed_text: Some("text".into()),
            user_notes: None,
            enhance_type: "action_items".into(),
        };
        let req = body.into_request().unwrap();
        assert_eq!(req.enhance_type, EnhanceType::ActionItems);
        assert_eq!(req.meeting_id, 3);
        assert_eq!(req.transcribed_text.as_deref(), Some("text"));
    }

    #[test]
    fn test_into_request_rejects_unknown_mode() {
        let body: EnhanceBody =
            serde_json::from_str(r#"{"meeting_id":1,"enhance_type":"invalid_type"}"#).unwrap();
        let err = body.into_request().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported enhancement type: invalid_type");
        assert!(matches!(err, Error::UnsupportedMode(_)));
    }
}
