use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, warn};

use crate::error::{PersistStage, PipelineError};
use crate::extract::MediaConverter;
use crate::language::is_arabic;
use crate::scratch::ScratchDir;
use crate::speech::SpeechToText;
use crate::summarize::{Summarizer, SummaryKind};

/// Seam for the meeting record store: one existence probe and the two
/// keyed writes the pipeline performs.
#[async_trait]
pub trait MeetingStore: Send + Sync + 'static {
    async fn exists(&self, meeting_id: ObjectId) -> anyhow::Result<bool>;

    async fn save_transcript(&self, meeting_id: ObjectId, transcript: &str) -> anyhow::Result<()>;

    /// Writes whichever halves were produced; `None` halves must be left
    /// untouched in the store.
    async fn save_artifacts(
        &self,
        meeting_id: ObjectId,
        summary: Option<&str>,
        action_items: Option<&str>,
    ) -> anyhow::Result<()>;
}

/// An uploaded recording, alive only for the duration of one request.
pub struct RecordingUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

/// What one pipeline run produced. `degraded` collects the non-fatal
/// failures; empty means full success.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub transcript: String,
    pub summary: Option<String>,
    pub tasks: Option<String>,
    pub degraded: Vec<String>,
}

impl PipelineOutcome {
    pub fn fully_succeeded(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// Result of the summarize-and-persist stage on its own.
#[derive(Debug)]
pub struct SummaryOutcome {
    pub summary: Option<String>,
    pub tasks: Option<String>,
    pub degraded: Vec<String>,
}

/// Sequences extraction, transcription, summarization and persistence for
/// one uploaded recording.
///
/// Collaborators are injected at construction; the orchestrator owns the
/// request-scoped scratch dir and guarantees its removal on every exit
/// path. Extraction and transcription failures are fatal; everything after
/// the transcript exists only degrades the result.
pub struct RecordingPipeline {
    converter: Arc<dyn MediaConverter>,
    speech: Arc<dyn SpeechToText>,
    summarizer: Arc<dyn Summarizer>,
    store: Arc<dyn MeetingStore>,
    scratch_root: Option<PathBuf>,
}

impl RecordingPipeline {
    pub fn new(
        converter: Arc<dyn MediaConverter>,
        speech: Arc<dyn SpeechToText>,
        summarizer: Arc<dyn Summarizer>,
        store: Arc<dyn MeetingStore>,
        scratch_root: Option<PathBuf>,
    ) -> Self {
        Self {
            converter,
            speech,
            summarizer,
            store,
            scratch_root,
        }
    }

    pub async fn run(
        &self,
        meeting_id: ObjectId,
        upload: RecordingUpload,
    ) -> Result<PipelineOutcome, PipelineError> {
        // Nothing is attempted for a meeting that does not exist.
        match self.store.exists(meeting_id).await {
            Ok(true) => {}
            Ok(false) => return Err(PipelineError::MeetingNotFound),
            Err(e) => return Err(PipelineError::StoreUnavailable(e.to_string())),
        }

        let mut scratch = ScratchDir::create(self.scratch_root.as_deref()).map_err(|e| {
            PipelineError::ExtractionFailed(format!("failed to create scratch dir: {e}"))
        })?;

        let outcome = self.run_stages(meeting_id, &upload, &scratch).await;

        // Removal happens on every exit path; ScratchDir's drop covers
        // panics and cancellation.
        if let Err(e) = scratch.cleanup() {
            warn!(%meeting_id, error = %e, "Failed to remove scratch dir");
        }

        outcome
    }

    async fn run_stages(
        &self,
        meeting_id: ObjectId,
        upload: &RecordingUpload,
        scratch: &ScratchDir,
    ) -> Result<PipelineOutcome, PipelineError> {
        let audio = self
            .converter
            .extract_audio(&upload.bytes, &upload.filename, scratch)
            .await
            .inspect_err(|e| error!(%meeting_id, error = %e, "Audio extraction failed"))?;
        info!(%meeting_id, bytes = audio.bytes.len(), "Audio track extracted");

        let transcript = self
            .speech
            .transcribe(&audio.bytes, &audio.filename)
            .await
            .inspect_err(|e| error!(%meeting_id, error = %e, "Transcription failed"))?;
        info!(%meeting_id, chars = transcript.len(), "Transcript ready");

        let mut degraded = Vec::new();

        // A failed write is recorded but does not stop summarization; the
        // transcript is still in memory.
        if let Err(e) = self.store.save_transcript(meeting_id, &transcript).await {
            let err = PipelineError::PersistenceFailed {
                stage: PersistStage::Transcript,
                message: e.to_string(),
            };
            error!(%meeting_id, error = %err, "Transcript persistence failed");
            degraded.push(err.to_string());
        }

        let artifacts = self.summarize_transcript(meeting_id, &transcript).await;
        degraded.extend(artifacts.degraded);

        Ok(PipelineOutcome {
            transcript,
            summary: artifacts.summary,
            tasks: artifacts.tasks,
            degraded,
        })
    }

    /// Runs the two generation calls concurrently and persists whichever
    /// halves succeeded. Shared by the upload pipeline and the
    /// transcript-only summarize endpoint.
    pub async fn summarize_transcript(
        &self,
        meeting_id: ObjectId,
        transcript: &str,
    ) -> SummaryOutcome {
        let arabic = is_arabic(transcript);
        let mut degraded = Vec::new();

        let (summary, tasks) = tokio::join!(
            self.summarizer
                .generate(SummaryKind::Narrative, arabic, transcript),
            self.summarizer
                .generate(SummaryKind::ActionItems, arabic, transcript),
        );

        let summary = summary
            .inspect_err(|e| {
                error!(%meeting_id, error = %e, "Summary generation failed");
                degraded.push(e.to_string());
            })
            .ok();
        let tasks = tasks
            .inspect_err(|e| {
                error!(%meeting_id, error = %e, "Task extraction failed");
                degraded.push(e.to_string());
            })
            .ok();

        if summary.is_some() || tasks.is_some() {
            if let Err(e) = self
                .store
                .save_artifacts(meeting_id, summary.as_deref(), tasks.as_deref())
                .await
            {
                let err = PipelineError::PersistenceFailed {
                    stage: PersistStage::Artifacts,
                    message: e.to_string(),
                };
                error!(%meeting_id, error = %err, "Artifact persistence failed");
                degraded.push(err.to_string());
            }
        }

        SummaryOutcome {
            summary,
            tasks,
            degraded,
        }
    }
}
