use meetspace_config::Settings;
use meetspace_pipeline::{
    AudioExtractor, MeetingStore, RecordingPipeline, SpeechClient, SummarizerClient,
};
use meetspace_services::{
    AuthService,
    dao::{meeting::MeetingDao, space::SpaceDao},
};
use mongodb::Database;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub spaces: Arc<SpaceDao>,
    pub meetings: Arc<MeetingDao>,
    pub pipeline: Arc<RecordingPipeline>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let spaces = Arc::new(SpaceDao::new(&db));
        let meetings = Arc::new(MeetingDao::new(&db));

        // Clients are built once at startup and handed to the orchestrator.
        let extractor = Arc::new(AudioExtractor::new(settings.media.ffmpeg_path.clone()));
        let speech = Arc::new(SpeechClient::new(&settings.speech));
        let summarizer = Arc::new(SummarizerClient::new(&settings.llm));
        let scratch_root = settings.upload.scratch_dir.clone().map(PathBuf::from);

        let meeting_store: Arc<dyn MeetingStore> = Arc::clone(&meetings) as Arc<dyn MeetingStore>;
        let pipeline = Arc::new(RecordingPipeline::new(
            extractor,
            speech,
            summarizer,
            meeting_store,
            scratch_root,
        ));

        Self {
            db,
            settings,
            auth,
            spaces,
            meetings,
            pipeline,
        }
    }
}
