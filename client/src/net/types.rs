//! Wire types for the chanbox REST API.
//!
//! DESIGN
//! ======
//! These mirror the backend's JSON shapes field for field. Timestamps are
//! Unix seconds; `None` expiry means the item never expires.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Lifetimes (minutes) a permanent key may mint visitor keys for.
pub const ROTATION_MINUTES: [i64; 3] = [60, 1_440, 10_080];

/// Default lifetime (minutes) for saved content and uploads.
pub const DEFAULT_EXPIRE_MINUTES: i64 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterExists {
    pub exists: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedKey {
    pub master_key: String,
}

/// The caller's own key, as reported by `/api/master/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    pub created_at: i64,
    pub expires_at: Option<i64>,
    pub is_permanent: bool,
    pub can_rotate: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateRequest {
    pub minutes: i64,
}

/// A freshly minted visitor key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatedKey {
    pub master_key: String,
    pub expires_at: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelView {
    pub name: String,
    pub content: String,
    pub expire_at: Option<i64>,
    pub password_set: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveChannelRequest {
    pub content: String,
    pub expire_minutes: i64,
    /// Replaces the channel password when present; `None` keeps it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveChannelResponse {
    pub ok: bool,
    pub expire_at: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: i64,
    pub name: String,
    pub size: i64,
    pub uploaded_at: i64,
    pub expire_at: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    pub files: Vec<FileEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUsage {
    pub channel: String,
    pub total: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub channels: Vec<ChannelUsage>,
    pub total_size: i64,
}
