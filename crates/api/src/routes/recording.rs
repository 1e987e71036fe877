use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bson::oid::ObjectId;
use serde::Serialize;
use tracing::{error, info};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};
use meetspace_pipeline::RecordingUpload;

/// MIME types accepted for an uploaded recording.
const ALLOWED_CONTENT_TYPES: &[&str] = &["video/webm", "video/mp4", "audio/webm"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResponse {
    pub message: String,
    pub transcript_length: usize,
    pub summary_generated: bool,
    pub tasks_generated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiallyProcessedResponse {
    pub message: String,
    pub transcript: String,
    pub summary: Option<String>,
    pub tasks: Option<String>,
}

/// Accepts a multipart recording upload (`file` field) and runs the full
/// processing pipeline for the meeting. 200 on full success, 207 when the
/// transcript exists but one or more later stages degraded, 4xx/5xx on a
/// fatal abort.
pub async fn process(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((space_id, meeting_id)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let sid = ObjectId::parse_str(&space_id)
        .map_err(|_| ApiError::BadRequest("Invalid space_id".to_string()))?;
    let mid = ObjectId::parse_str(&meeting_id)
        .map_err(|_| ApiError::BadRequest("Invalid meeting_id".to_string()))?;

    if !state.spaces.is_member(sid, auth.user_id).await? {
        return Err(ApiError::Forbidden("Not a member".to_string()));
    }

    let mut file_data: Option<(String, String, Vec<u8>)> = None; // (filename, content_type, bytes)

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("recording").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
        file_data = Some((filename, content_type, bytes.to_vec()));
    }

    let (filename, content_type, bytes) =
        file_data.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;

    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(ApiError::Validation(format!(
            "Unsupported content type '{}', expected one of: {}",
            content_type,
            ALLOWED_CONTENT_TYPES.join(", ")
        )));
    }
    if bytes.is_empty() {
        return Err(ApiError::Validation("Uploaded file is empty".to_string()));
    }

    info!(%mid, %filename, bytes = bytes.len(), "Processing recording upload");

    let upload = RecordingUpload {
        bytes,
        content_type,
        filename,
    };

    let outcome = state.pipeline.run(mid, upload).await.map_err(|e| {
        error!(meeting_id = %mid, error = %e, "Recording pipeline aborted");
        ApiError::from(e)
    })?;

    if outcome.fully_succeeded() {
        let body = ProcessedResponse {
            message: "Recording processed".to_string(),
            transcript_length: outcome.transcript.len(),
            summary_generated: outcome.summary.is_some(),
            tasks_generated: outcome.tasks.is_some(),
        };
        return Ok(Json(body).into_response());
    }

    let body = PartiallyProcessedResponse {
        message: format!(
            "Recording processed with errors: {}",
            outcome.degraded.join("; ")
        ),
        transcript: outcome.transcript,
        summary: outcome.summary,
        tasks: outcome.tasks,
    };
    Ok((StatusCode::MULTI_STATUS, Json(body)).into_response())
}
