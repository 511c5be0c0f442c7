//! Channel text routes.

#[cfg(test)]
#[path = "channels_test.rs"]
mod channels_test;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use super::error::ApiError;
use super::extract::ChannelAccess;
use crate::services::channel::{self, ChannelView};
use crate::state::AppState;

/// Lifetime used when a save or upload does not say.
pub const DEFAULT_EXPIRE_MINUTES: i64 = 10;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SaveBody {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub expire_minutes: Option<Value>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PasswordBody {
    #[serde(default)]
    pub password: Option<String>,
}

/// Parse a JSON body; an empty body counts as `{}`.
pub(crate) fn json_body<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|_| ApiError::bad_request("invalid_json"))
}

/// Minutes from a JSON number or numeric string, else the default.
pub(crate) fn expire_minutes(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .unwrap_or(DEFAULT_EXPIRE_MINUTES)
}

/// `GET /api/channel/{channel}`
pub async fn get(State(state): State<AppState>, access: ChannelAccess) -> Result<Json<ChannelView>, ApiError> {
    Ok(Json(channel::get_channel(&state.pool, &access.channel).await?))
}

/// `POST /api/channel/{channel}/save`
pub async fn save(
    State(state): State<AppState>,
    access: ChannelAccess,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let body: SaveBody = json_body(&body)?;
    let expire_at = channel::save_channel(
        &state.pool,
        &access.channel,
        body.content.as_deref().unwrap_or_default(),
        expire_minutes(body.expire_minutes.as_ref()),
        body.password.as_deref(),
    )
    .await?;
    tracing::debug!(channel = %access.channel, ?expire_at, "channel saved");
    Ok(Json(json!({ "ok": true, "expire_at": expire_at })))
}

/// `POST /api/channel/{channel}/password`: set, or clear with `""`.
pub async fn password(
    State(state): State<AppState>,
    access: ChannelAccess,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let body: PasswordBody = json_body(&body)?;
    channel::set_password(&state.pool, &access.channel, body.password.as_deref().unwrap_or_default()).await?;
    Ok(Json(json!({ "ok": true })))
}
