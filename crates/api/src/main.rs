use meetspace_api::{build_router, state::AppState};
use meetspace_config::Settings;
use meetspace_db::{connect, indexes::ensure_indexes};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "meetspace_api=debug,meetspace_services=debug,meetspace_db=debug,meetspace_pipeline=debug,tower_http=debug"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!(
        "Starting Meetspace API on {}:{}",
        settings.app.host, settings.app.port
    );
    info!(
        ffmpeg = %settings.media.ffmpeg_path,
        speech_configured = settings.speech.api_key.is_some(),
        llm_configured = settings.llm.api_key.is_some(),
        "Recording pipeline config"
    );

    // Connect to MongoDB
    let db = connect(&settings).await?;

    // Ensure indexes
    ensure_indexes(&db).await?;

    // Build app state (wires DAOs and the recording pipeline)
    let app_state = AppState::new(db, settings.clone());

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
