//! Route table

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{
    handle_annotate, handle_app_js, handle_health, handle_index, handle_serve_pdf, handle_upload,
};
use crate::state::AppState;

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Viewer
        .route("/", get(handle_index))
        .route("/static/app.js", get(handle_app_js))
        // Health check
        .route("/health", get(handle_health))
        // Uploads
        .route("/upload", post(handle_upload))
        .route("/pdf/:filename", get(handle_serve_pdf))
        // Notion
        .route("/annotate", post(handle_annotate))
        // Middleware
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
