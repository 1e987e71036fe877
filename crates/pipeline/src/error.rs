use std::fmt;

use thiserror::Error;

use crate::summarize::SummaryKind;

/// Errors raised by the recording-processing pipeline.
///
/// `MeetingNotFound` through `TranscriptionFailed` are fatal and abort the
/// run; `SummarizationFailed` and `PersistenceFailed` are recorded as
/// degradations and the run continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Meeting not found")]
    MeetingNotFound,
    #[error("Meeting store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Audio extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("Transcription service not configured: {0}")]
    TranscriptionUnavailable(String),
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("{kind} generation failed: {message}")]
    SummarizationFailed { kind: SummaryKind, message: String },
    #[error("Failed to persist {stage}: {message}")]
    PersistenceFailed {
        stage: PersistStage,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    Transcript,
    Artifacts,
}

impl fmt::Display for PersistStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistStage::Transcript => write!(f, "transcript"),
            PersistStage::Artifacts => write!(f, "summary artifacts"),
        }
    }
}
