pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Recording uploads carry whole meeting videos; the body cap lives on
    // this route only.
    let recording_routes = Router::new()
        .route("/recording", post(routes::recording::process))
        .layer(DefaultBodyLimit::max(state.settings.upload.max_bytes));

    let meeting_routes = Router::new()
        .merge(recording_routes)
        .route("/summary", post(routes::summary::generate));

    let api = Router::new().nest(
        "/space/{space_id}/meeting/{meeting_id}",
        meeting_routes,
    );

    // Health check
    let health = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
