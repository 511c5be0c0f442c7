//! File drops attached to a channel.
//!
//! DESIGN
//! ======
//! File bodies live flat in the upload directory under a generated name;
//! the row in `files` keeps the original name for downloads. The stored name
//! never contains user-supplied path components.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use std::path::Path;

use serde::Serialize;
use sqlx::{PgPool, Row};

use super::ErrorCode;
use super::expiry::{expiry_from_minutes, is_expired, now_ts};

const FALLBACK_NAME: &str = "file";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("no file in upload")]
    NoFile,
    #[error("file not found")]
    NotFound,
    #[error("file expired")]
    Expired,
    #[error("file storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ErrorCode for FileError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoFile => "no_file",
            Self::NotFound => "not_found",
            Self::Expired => "file_expired",
            Self::Io(_) | Self::Database(_) => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub id: i64,
    pub name: String,
    pub size: i64,
    pub uploaded_at: i64,
    pub expire_at: Option<i64>,
}

/// Total stored bytes for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelUsage {
    pub channel: String,
    pub total: i64,
}

/// A file body ready to stream back.
#[derive(Debug)]
pub struct Download {
    pub name: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// NAMING
// =============================================================================

/// Filesystem-safe name for a new upload in `channel`.
#[must_use]
pub fn stored_name(channel: &str, now: i64) -> String {
    let safe: String = channel
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{safe}_{}_{now}", uuid::Uuid::new_v4().simple())
}

/// The last path component of a client-supplied file name.
#[must_use]
pub fn display_name(raw: Option<&str>) -> String {
    raw.and_then(|n| n.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .map_or_else(|| FALLBACK_NAME.to_owned(), str::to_owned)
}

/// `Content-Disposition` value for a download. Quotes and control
/// characters are replaced so the header stays well-formed.
#[must_use]
pub fn content_disposition(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

// =============================================================================
// STORAGE
// =============================================================================

/// Write an upload to disk and record it. Returns the new row id.
///
/// # Errors
///
/// Returns an I/O error if the body cannot be written, or a database error.
pub async fn store_upload(
    pool: &PgPool,
    upload_dir: &Path,
    channel: &str,
    original_name: &str,
    bytes: &[u8],
    expire_minutes: i64,
) -> Result<i64, FileError> {
    let now = now_ts();
    let stored = stored_name(channel, now);
    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(upload_dir.join(&stored), bytes).await?;

    let size = i64::try_from(bytes.len()).unwrap_or(i64::MAX);
    let row = sqlx::query(
        r"INSERT INTO files (channel_name, stored_name, original_name, size, uploaded_at, expire_at)
          VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(channel)
    .bind(&stored)
    .bind(original_name)
    .bind(size)
    .bind(now)
    .bind(expiry_from_minutes(expire_minutes, now))
    .fetch_one(pool)
    .await;

    match row {
        Ok(row) => {
            let id: i64 = row.get("id");
            tracing::info!(%channel, id, size, "file stored");
            Ok(id)
        }
        Err(e) => {
            remove_stored(upload_dir, &stored).await;
            Err(e.into())
        }
    }
}

/// Files in `channel`, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_files(pool: &PgPool, channel: &str) -> Result<Vec<FileEntry>, FileError> {
    let rows = sqlx::query(
        r"SELECT id, original_name, size, uploaded_at, expire_at FROM files
          WHERE channel_name = $1 ORDER BY uploaded_at DESC, id DESC",
    )
    .bind(channel)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| FileEntry {
            id: r.get("id"),
            name: r.get("original_name"),
            size: r.get("size"),
            uploaded_at: r.get("uploaded_at"),
            expire_at: r.get("expire_at"),
        })
        .collect())
}

/// Load a file body for download.
///
/// # Errors
///
/// [`FileError::NotFound`] when the row or its body is gone,
/// [`FileError::Expired`] when the file's expiry has passed.
pub async fn read_download(pool: &PgPool, upload_dir: &Path, channel: &str, id: i64) -> Result<Download, FileError> {
    let row = sqlx::query("SELECT stored_name, original_name, expire_at FROM files WHERE id = $1 AND channel_name = $2")
        .bind(id)
        .bind(channel)
        .fetch_optional(pool)
        .await?
        .ok_or(FileError::NotFound)?;

    if is_expired(row.get("expire_at"), now_ts()) {
        return Err(FileError::Expired);
    }

    let stored: String = row.get("stored_name");
    let bytes = match tokio::fs::read(upload_dir.join(&stored)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(FileError::NotFound),
        Err(e) => return Err(e.into()),
    };
    Ok(Download { name: row.get("original_name"), bytes })
}

/// Delete a file body and its row.
///
/// # Errors
///
/// [`FileError::NotFound`] when no such file exists in `channel`.
pub async fn delete_file(pool: &PgPool, upload_dir: &Path, channel: &str, id: i64) -> Result<(), FileError> {
    let row = sqlx::query("DELETE FROM files WHERE id = $1 AND channel_name = $2 RETURNING stored_name")
        .bind(id)
        .bind(channel)
        .fetch_optional(pool)
        .await?
        .ok_or(FileError::NotFound)?;
    remove_stored(upload_dir, &row.get::<String, _>("stored_name")).await;
    Ok(())
}

/// Best-effort removal of a stored body.
pub async fn remove_stored(upload_dir: &Path, stored: &str) {
    if let Err(e) = tokio::fs::remove_file(upload_dir.join(stored)).await {
        tracing::debug!(%stored, error = %e, "stored file removal skipped");
    }
}

/// Stored bytes per channel, largest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn usage(pool: &PgPool) -> Result<Vec<ChannelUsage>, FileError> {
    let rows = sqlx::query(
        r"SELECT channel_name, SUM(size)::BIGINT AS total FROM files
          GROUP BY channel_name ORDER BY total DESC, channel_name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| ChannelUsage { channel: r.get("channel_name"), total: r.get("total") })
        .collect())
}
