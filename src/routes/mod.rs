//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything under `/api` is the JSON API. Every other path serves the
//! built single-page client from `STATIC_DIR`, falling back to `index.html`
//! so client-side routes such as `/general/password` deep-link.

pub mod channels;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod files;
pub mod master;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{any, delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use self::error::ApiError;
use crate::state::AppState;

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/api/health", get(master::health))
        .route("/api/master/exists", get(master::exists))
        .route("/api/master/peek-once", post(master::peek_once))
        .route("/api/master/me", get(master::me))
        .route("/api/master/rotate", post(master::rotate))
        .route("/api/channel/{channel}", get(channels::get))
        .route("/api/channel/{channel}/save", post(channels::save))
        .route("/api/channel/{channel}/password", post(channels::password))
        .route("/api/channel/{channel}/upload", post(files::upload))
        .route("/api/channel/{channel}/files", get(files::list))
        .route("/api/channel/{channel}/download/{id}", get(files::download))
        .route("/api/channel/{channel}/file/{id}", delete(files::delete))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/cleanup", post(dashboard::cleanup))
        .route("/api/{*rest}", any(api_not_found))
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

async fn api_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_found")
}

/// The full application: API plus the static client.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let spa = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    api_routes(state)
        .fallback_service(spa)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
