//! Health and master-key routes.

#[cfg(test)]
#[path = "master_test.rs"]
mod master_test;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Serialize;
use serde_json::{Value, json};

use super::error::ApiError;
use super::extract::MasterKey;
use crate::services::keys::{self, RotatedKey};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct KeyInfoResponse {
    pub created_at: i64,
    pub expires_at: Option<i64>,
    pub is_permanent: bool,
    pub can_rotate: bool,
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /api/master/exists`: whether a key has been generated yet.
pub async fn exists(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let exists = keys::first_key(&state.pool).await?.is_some();
    Ok(Json(json!({ "exists": exists })))
}

/// `POST /api/master/peek-once`: reveal the first key to the gate page.
pub async fn peek_once(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let key = keys::peek_first_key(&state.pool).await?;
    Ok(Json(json!({ "master_key": key })))
}

/// `GET /api/master/me`: describe the calling key.
pub async fn me(MasterKey(key): MasterKey) -> Json<KeyInfoResponse> {
    let is_permanent = key.is_permanent();
    Json(KeyInfoResponse {
        created_at: key.created_at,
        expires_at: key.expires_at,
        is_permanent,
        can_rotate: is_permanent,
    })
}

/// `POST /api/master/rotate`: mint a visitor key. Body: `{"minutes": n}`.
pub async fn rotate(
    State(state): State<AppState>,
    MasterKey(key): MasterKey,
    body: Bytes,
) -> Result<Json<RotatedKey>, ApiError> {
    let minutes = rotation_minutes(&body);
    let rotated = keys::rotate(&state.pool, &key, minutes).await?;
    Ok(Json(rotated))
}

/// `minutes` from a rotate body; anything unparsable is treated as absent so
/// it reports `minutes_invalid` rather than a JSON error.
pub(crate) fn rotation_minutes(body: &[u8]) -> Option<i64> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("minutes").and_then(Value::as_i64))
}
