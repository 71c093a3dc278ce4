//! Axum router configuration

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{
    analyze_video, format_video_transcript, health_check, root_index, translate_text,
    video_transcript,
};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(root_index))
        .route("/api/health", get(health_check))
        .route("/api/transcript", post(video_transcript))
        .route("/api/analyze", post(analyze_video))
        .route("/api/format-transcript", post(format_video_transcript))
        .route("/api/translate", post(translate_text))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Build the CORS layer from the configured origin list. An empty list or
/// a `"*"` entry allows any origin, which is how the service has been
/// deployed so far.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(AllowOrigin::list(parsed))
    }
}
