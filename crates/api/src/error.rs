use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meetspace_pipeline::PipelineError;
use meetspace_services::auth::AuthError;
use meetspace_services::dao::base::DaoError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Internal(String),
    Validation(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DaoError> for ApiError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DaoError::DuplicateKey(msg) => ApiError::Conflict(msg),
            DaoError::Validation(msg) => ApiError::Validation(msg),
            DaoError::Mongo(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonSer(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonDe(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

/// Fatal pipeline errors become an HTTP abort. The full detail is already
/// in the log; responses carry a summarized message without subprocess
/// stderr or upstream payloads.
impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::MeetingNotFound => {
                ApiError::NotFound("Meeting not found".to_string())
            }
            PipelineError::StoreUnavailable(_) => {
                ApiError::Internal("Meeting store unavailable".to_string())
            }
            PipelineError::ExtractionFailed(_) => {
                ApiError::Internal("Audio extraction failed".to_string())
            }
            PipelineError::TranscriptionUnavailable(_) => {
                ApiError::Internal("Transcription service not configured".to_string())
            }
            PipelineError::TranscriptionFailed(_) => {
                ApiError::Internal("Transcription failed".to_string())
            }
            PipelineError::SummarizationFailed { kind, .. } => {
                ApiError::Internal(format!("{kind} generation failed"))
            }
            PipelineError::PersistenceFailed { stage, .. } => {
                ApiError::Internal(format!("Failed to persist {stage}"))
            }
        }
    }
}
