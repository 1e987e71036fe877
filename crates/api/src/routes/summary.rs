use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bson::oid::ObjectId;
use serde::Serialize;
use tracing::info;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};
use meetspace_pipeline::{ActionItem, parse_action_items};
use meetspace_services::dao::base::DaoError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub message: String,
    pub summary: Option<String>,
    pub tasks: Option<String>,
    pub action_items: Vec<ActionItem>,
}

/// Regenerates the summary artifacts from a meeting's stored transcript,
/// without re-uploading a recording. Uses the same generation stage as the
/// upload pipeline.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((space_id, meeting_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let sid = ObjectId::parse_str(&space_id)
        .map_err(|_| ApiError::BadRequest("Invalid space_id".to_string()))?;
    let mid = ObjectId::parse_str(&meeting_id)
        .map_err(|_| ApiError::BadRequest("Invalid meeting_id".to_string()))?;

    if !state.spaces.is_member(sid, auth.user_id).await? {
        return Err(ApiError::Forbidden("Not a member".to_string()));
    }

    let meeting = state.meetings.base.find_by_id(mid).await.map_err(|e| match e {
        DaoError::NotFound => ApiError::NotFound("Meeting not found".to_string()),
        other => ApiError::from(other),
    })?;

    let transcript = meeting
        .transcript
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Meeting has no transcript".to_string()))?;

    info!(%mid, chars = transcript.len(), "Regenerating summary artifacts");

    let outcome = state.pipeline.summarize_transcript(mid, &transcript).await;

    if outcome.summary.is_none() && outcome.tasks.is_none() {
        return Err(ApiError::Internal(format!(
            "Summary generation failed: {}",
            outcome.degraded.join("; ")
        )));
    }

    let action_items = outcome
        .tasks
        .as_deref()
        .map(parse_action_items)
        .unwrap_or_default();

    let status = if outcome.degraded.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    let message = if outcome.degraded.is_empty() {
        "Summary artifacts generated".to_string()
    } else {
        format!(
            "Summary artifacts generated with errors: {}",
            outcome.degraded.join("; ")
        )
    };

    let body = SummaryResponse {
        message,
        summary: outcome.summary,
        tasks: outcome.tasks,
        action_items,
    };
    Ok((status, Json(body)).into_response())
}
