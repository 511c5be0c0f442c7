//! Channel service: access checks, content, and passwords.
//!
//! DESIGN
//! ======
//! A channel row is created lazily on first save; reading an unknown channel
//! yields empty content. Passwords are stored as lowercase hex SHA-256 and
//! compared against the hash of the supplied password.
//!
//! ERROR HANDLING
//! ==============
//! An expired channel is purged (files on disk, file rows, channel row) as
//! soon as someone touches it, and the caller gets [`ChannelError::Expired`].
//! Disk removal failures never block the purge.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};

use super::ErrorCode;
use super::expiry::{expiry_from_minutes, is_expired, now_ts};
use super::files;
use super::keys::bytes_to_hex;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel expired")]
    Expired,
    #[error("channel password required")]
    PasswordRequired,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ErrorCode for ChannelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Expired => "channel_expired",
            Self::PasswordRequired => "password_required",
            Self::Database(_) => "internal_error",
        }
    }
}

/// The columns an access check needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGate {
    pub password_hash: Option<String>,
    pub expire_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelView {
    pub name: String,
    pub content: String,
    pub expire_at: Option<i64>,
    pub password_set: bool,
}

impl ChannelView {
    /// What an unknown channel looks like.
    #[must_use]
    pub fn empty(name: &str) -> Self {
        Self { name: name.to_owned(), content: String::new(), expire_at: None, password_set: false }
    }
}

// =============================================================================
// ACCESS
// =============================================================================

#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Decide access to a channel at time `now`. Unknown channels are open.
///
/// # Errors
///
/// [`ChannelError::Expired`] when the channel's expiry has passed (checked
/// first), [`ChannelError::PasswordRequired`] when a password is set and the
/// supplied one is absent, empty, or wrong.
pub fn check_access(gate: Option<&ChannelGate>, password: Option<&str>, now: i64) -> Result<(), ChannelError> {
    let Some(gate) = gate else {
        return Ok(());
    };
    if is_expired(gate.expire_at, now) {
        return Err(ChannelError::Expired);
    }
    let Some(expected) = gate.password_hash.as_deref().filter(|h| !h.is_empty()) else {
        return Ok(());
    };
    match password.filter(|p| !p.is_empty()) {
        Some(supplied) if hash_password(supplied) == expected => Ok(()),
        _ => Err(ChannelError::PasswordRequired),
    }
}

/// Check access to `channel`, purging it first if it has expired.
///
/// # Errors
///
/// As [`check_access`], or a database error.
pub async fn authorize(
    pool: &PgPool,
    upload_dir: &Path,
    channel: &str,
    password: Option<&str>,
) -> Result<(), ChannelError> {
    let row = sqlx::query("SELECT password_hash, expire_at FROM channels WHERE name = $1")
        .bind(channel)
        .fetch_optional(pool)
        .await?;
    let gate = row.map(|r| ChannelGate { password_hash: r.get("password_hash"), expire_at: r.get("expire_at") });

    let result = check_access(gate.as_ref(), password, now_ts());
    if matches!(result, Err(ChannelError::Expired)) {
        purge_channel(pool, upload_dir, channel).await?;
        tracing::info!(%channel, "expired channel purged on access");
    }
    result
}

// =============================================================================
// CONTENT
// =============================================================================

/// Load a channel, or an empty view when it has never been saved.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn get_channel(pool: &PgPool, channel: &str) -> Result<ChannelView, ChannelError> {
    let row = sqlx::query("SELECT name, content, expire_at, password_hash FROM channels WHERE name = $1")
        .bind(channel)
        .fetch_optional(pool)
        .await?;

    Ok(row.map_or_else(
        || ChannelView::empty(channel),
        |r| {
            let password_hash: Option<String> = r.get("password_hash");
            ChannelView {
                name: r.get("name"),
                content: r.get::<Option<String>, _>("content").unwrap_or_default(),
                expire_at: r.get("expire_at"),
                password_set: password_hash.is_some_and(|h| !h.is_empty()),
            }
        },
    ))
}

/// Create or replace a channel's content and expiry. A non-empty `password`
/// replaces the stored hash; otherwise the existing password is kept.
/// Returns the new expiry.
///
/// # Errors
///
/// Returns a database error if the upsert fails.
pub async fn save_channel(
    pool: &PgPool,
    channel: &str,
    content: &str,
    expire_minutes: i64,
    password: Option<&str>,
) -> Result<Option<i64>, ChannelError> {
    let expire_at = expiry_from_minutes(expire_minutes, now_ts());
    let password_hash = password.filter(|p| !p.is_empty()).map(hash_password);

    sqlx::query(
        r"INSERT INTO channels (name, content, expire_at, password_hash)
          VALUES ($1, $2, $3, $4)
          ON CONFLICT (name) DO UPDATE SET
              content = EXCLUDED.content,
              expire_at = EXCLUDED.expire_at,
              password_hash = COALESCE(EXCLUDED.password_hash, channels.password_hash)",
    )
    .bind(channel)
    .bind(content)
    .bind(expire_at)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(expire_at)
}

/// Set the channel password, or clear it when `password` is empty. A channel
/// that has never been saved is left untouched.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn set_password(pool: &PgPool, channel: &str, password: &str) -> Result<(), ChannelError> {
    let password_hash = (!password.is_empty()).then(|| hash_password(password));
    sqlx::query("UPDATE channels SET password_hash = $1 WHERE name = $2")
        .bind(password_hash)
        .bind(channel)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove a channel with all of its files.
///
/// # Errors
///
/// Returns a database error if a query fails. Disk errors are ignored.
pub async fn purge_channel(pool: &PgPool, upload_dir: &Path, channel: &str) -> Result<(), sqlx::Error> {
    let stored: Vec<String> = sqlx::query("SELECT stored_name FROM files WHERE channel_name = $1")
        .bind(channel)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|r| r.get("stored_name"))
        .collect();
    for name in &stored {
        files::remove_stored(upload_dir, name).await;
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM files WHERE channel_name = $1")
        .bind(channel)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM channels WHERE name = $1")
        .bind(channel)
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}
