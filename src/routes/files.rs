//! File upload, listing, download, and delete routes.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use super::channels::DEFAULT_EXPIRE_MINUTES;
use super::error::ApiError;
use super::extract::{ChannelAccess, FileId};
use crate::services::files::{self, FileError};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const EXPIRE_FIELD: &str = "expire_minutes";

/// `POST /api/channel/{channel}/upload`: multipart `file` + `expire_minutes`.
pub async fn upload(
    State(state): State<AppState>,
    access: ChannelAccess,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut expire_minutes = DEFAULT_EXPIRE_MINUTES;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("invalid_multipart"))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                let name = files::display_name(field.file_name());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("invalid_multipart"))?;
                upload = Some((name, bytes.to_vec()));
            }
            Some(EXPIRE_FIELD) => {
                let text = field.text().await.unwrap_or_default();
                expire_minutes = text.trim().parse().unwrap_or(DEFAULT_EXPIRE_MINUTES);
            }
            _ => {}
        }
    }

    let (name, bytes) = upload.ok_or(FileError::NoFile)?;
    let id = files::store_upload(&state.pool, state.upload_dir(), &access.channel, &name, &bytes, expire_minutes).await?;
    Ok(Json(json!({ "ok": true, "id": id })))
}

/// `GET /api/channel/{channel}/files`: newest first.
pub async fn list(State(state): State<AppState>, access: ChannelAccess) -> Result<Json<Value>, ApiError> {
    let entries = files::list_files(&state.pool, &access.channel).await?;
    Ok(Json(json!({ "files": entries })))
}

/// `GET /api/channel/{channel}/download/{id}`
pub async fn download(
    State(state): State<AppState>,
    FileId(id): FileId,
    access: ChannelAccess,
) -> Result<Response, ApiError> {
    let file = files::read_download(&state.pool, state.upload_dir(), &access.channel, id).await?;
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/octet-stream".to_owned()),
            (CONTENT_DISPOSITION, files::content_disposition(&file.name)),
        ],
        file.bytes,
    )
        .into_response())
}

/// `DELETE /api/channel/{channel}/file/{id}`
pub async fn delete(
    State(state): State<AppState>,
    FileId(id): FileId,
    access: ChannelAccess,
) -> Result<Json<Value>, ApiError> {
    files::delete_file(&state.pool, state.upload_dir(), &access.channel, id).await?;
    tracing::info!(channel = %access.channel, id, "file deleted");
    Ok(Json(json!({ "ok": true })))
}
