//! Master key service: bootstrap, authentication, and visitor-key rotation.
//!
//! DESIGN
//! ======
//! Keys live in `app_keys`. A key with `expires_at IS NULL` is permanent and
//! may mint visitor keys; visitor keys carry an expiry and cannot mint.
//! The first permanent key is created at startup when the table is empty.
//!
//! ERROR HANDLING
//! ==============
//! Authentication failures are distinct variants so routes can report
//! `missing_master_key`, `invalid_master_key`, and `expired_master_key`
//! separately. Database failures surface as [`KeyError::Database`].

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

use std::fmt::Write as _;

use rand::Rng;
use sqlx::{PgPool, Row};

use super::ErrorCode;
use super::expiry::{is_expired, now_ts};

/// Visitor-key lifetimes a permanent key may request, in minutes.
pub const ROTATION_MINUTES: [i64; 3] = [60, 1_440, 10_080];

const KEY_BYTES: usize = 24;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("master key missing")]
    Missing,
    #[error("master key not recognised")]
    Invalid,
    #[error("master key expired")]
    Expired,
    #[error("visitor keys cannot mint new keys")]
    VisitorCannotRotate,
    #[error("rotation minutes must be 60, 1440, or 10080")]
    MinutesInvalid,
    #[error("no master key has been created")]
    NotInitialized,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ErrorCode for KeyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing => "missing_master_key",
            Self::Invalid => "invalid_master_key",
            Self::Expired => "expired_master_key",
            Self::VisitorCannotRotate => "visitor_cannot_rotate",
            Self::MinutesInvalid => "minutes_invalid",
            Self::NotInitialized => "not_initialized",
            Self::Database(_) => "internal_error",
        }
    }
}

/// Row from `app_keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRow {
    pub key: String,
    pub created_at: i64,
    pub expires_at: Option<i64>,
}

impl KeyRow {
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }
}

/// A freshly minted visitor key.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RotatedKey {
    pub master_key: String,
    pub expires_at: i64,
}

// =============================================================================
// GENERATION
// =============================================================================

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 24-byte hex key.
#[must_use]
pub fn generate_key() -> String {
    let bytes: [u8; KEY_BYTES] = rand::rng().random();
    bytes_to_hex(&bytes)
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Decide whether a looked-up key row authenticates at time `now`.
///
/// # Errors
///
/// [`KeyError::Invalid`] when no row matched, [`KeyError::Expired`] when the
/// key's expiry has passed.
pub fn check_key(row: Option<KeyRow>, now: i64) -> Result<KeyRow, KeyError> {
    let row = row.ok_or(KeyError::Invalid)?;
    if is_expired(row.expires_at, now) {
        return Err(KeyError::Expired);
    }
    Ok(row)
}

/// Check that `parent` may mint a visitor key for `minutes`.
///
/// # Errors
///
/// [`KeyError::VisitorCannotRotate`] for visitor keys (checked first), then
/// [`KeyError::MinutesInvalid`] when `minutes` is absent or not allowed.
pub fn validate_rotation(parent: &KeyRow, minutes: Option<i64>) -> Result<i64, KeyError> {
    if !parent.is_permanent() {
        return Err(KeyError::VisitorCannotRotate);
    }
    minutes
        .filter(|m| ROTATION_MINUTES.contains(m))
        .ok_or(KeyError::MinutesInvalid)
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Look up `key` and check it has not expired.
///
/// # Errors
///
/// [`KeyError::Missing`] for an absent or empty key, otherwise as
/// [`check_key`], or a database error.
pub async fn authenticate(pool: &PgPool, key: Option<&str>) -> Result<KeyRow, KeyError> {
    let key = key.filter(|k| !k.is_empty()).ok_or(KeyError::Missing)?;
    let row = find_key(pool, key).await?;
    check_key(row, now_ts())
}

/// Fetch a key row by value.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn find_key(pool: &PgPool, key: &str) -> Result<Option<KeyRow>, KeyError> {
    let row = sqlx::query("SELECT key, created_at, expires_at FROM app_keys WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| KeyRow { key: r.get("key"), created_at: r.get("created_at"), expires_at: r.get("expires_at") }))
}

/// The oldest key, which is the one generated at first startup.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn first_key(pool: &PgPool) -> Result<Option<String>, KeyError> {
    let row = sqlx::query("SELECT key FROM app_keys ORDER BY id LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| r.get("key")))
}

/// Reveal the first key for the gate's "show once" flow.
///
/// # Errors
///
/// [`KeyError::NotInitialized`] when no key exists yet.
pub async fn peek_first_key(pool: &PgPool) -> Result<String, KeyError> {
    first_key(pool).await?.ok_or(KeyError::NotInitialized)
}

/// Create the first permanent key if the table is empty. Returns the new key
/// so startup can log it once.
///
/// # Errors
///
/// Returns a database error if the lookup or insert fails.
pub async fn ensure_initial_key(pool: &PgPool) -> Result<Option<String>, KeyError> {
    if first_key(pool).await?.is_some() {
        return Ok(None);
    }
    let key = generate_key();
    sqlx::query("INSERT INTO app_keys (key, created_at, expires_at) VALUES ($1, $2, NULL)")
        .bind(&key)
        .bind(now_ts())
        .execute(pool)
        .await?;
    Ok(Some(key))
}

/// Mint a visitor key from `parent`.
///
/// # Errors
///
/// As [`validate_rotation`], or a database error.
pub async fn rotate(pool: &PgPool, parent: &KeyRow, minutes: Option<i64>) -> Result<RotatedKey, KeyError> {
    let minutes = validate_rotation(parent, minutes)?;
    let now = now_ts();
    let expires_at = now + minutes * 60;
    let key = generate_key();
    sqlx::query("INSERT INTO app_keys (key, created_at, expires_at) VALUES ($1, $2, $3)")
        .bind(&key)
        .bind(now)
        .bind(expires_at)
        .execute(pool)
        .await?;
    tracing::info!(minutes, expires_at, "visitor key minted");
    Ok(RotatedKey { master_key: key, expires_at })
}
