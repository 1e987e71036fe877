pub mod error;
pub mod extract;
pub mod language;
pub mod orchestrator;
pub mod scratch;
pub mod speech;
pub mod summarize;

pub use error::{PersistStage, PipelineError};
pub use extract::{AudioExtractor, ExtractedAudio, MediaConverter};
pub use language::is_arabic;
pub use orchestrator::{
    MeetingStore, PipelineOutcome, RecordingPipeline, RecordingUpload, SummaryOutcome,
};
pub use scratch::ScratchDir;
pub use speech::{SpeechClient, SpeechToText};
pub use summarize::{ActionItem, Summarizer, SummarizerClient, SummaryKind, parse_action_items};
