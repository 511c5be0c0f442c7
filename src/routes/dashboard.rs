//! Dashboard and on-demand cleanup.

use axum::Json;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::response::IntoResponse;
use serde_json::{Value, json};

use super::error::ApiError;
use super::extract::MasterKey;
use crate::services::{cleanup, files};
use crate::state::AppState;

const NO_CACHE: [(axum::http::HeaderName, &str); 3] =
    [(CACHE_CONTROL, "no-store, no-cache, must-revalidate"), (PRAGMA, "no-cache"), (EXPIRES, "0")];

/// `GET /api/dashboard`: per-channel storage after sweeping expired data.
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    cleanup::sweep(&state.pool, state.upload_dir()).await?;
    let channels = files::usage(&state.pool).await?;
    let total_size: i64 = channels.iter().map(|c| c.total).sum();
    Ok((NO_CACHE, Json(json!({ "channels": channels, "total_size": total_size }))))
}

/// `POST /api/cleanup`
pub async fn cleanup(State(state): State<AppState>, _key: MasterKey) -> Result<Json<Value>, ApiError> {
    let report = cleanup::sweep(&state.pool, state.upload_dir()).await?;
    tracing::info!(files = report.files, channels = report.channels, "manual cleanup");
    Ok(Json(json!({ "ok": true })))
}
