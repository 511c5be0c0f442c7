//! Request extractors for master-key and channel access.
//!
//! DESIGN
//! ======
//! Credentials may arrive as a header or a query parameter (download links
//! cannot set headers). The header wins; an empty value counts as absent.
//! Channel routes report a missing key as `invalid_master_key` so the client
//! treats both the same way.

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;

use std::collections::HashMap;

use axum::extract::{FromRef, FromRequestParts, Path, Query};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use super::error::ApiError;
use crate::services::channel;
use crate::services::keys::{self, KeyError, KeyRow};
use crate::state::AppState;

pub const MASTER_KEY_HEADER: &str = "x-master-key";
pub const MASTER_KEY_PARAM: &str = "master_key";
pub const CHANNEL_PASSWORD_HEADER: &str = "x-channel-password";
pub const CHANNEL_PASSWORD_PARAM: &str = "password";

/// Pick a credential from `header`, falling back to query `param`.
#[must_use]
pub fn credential(headers: &HeaderMap, query: &HashMap<String, String>, header: &str, param: &str) -> Option<String> {
    headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| query.get(param).map(String::as_str).filter(|v| !v.is_empty()))
        .map(str::to_owned)
}

fn query_params(parts: &Parts) -> HashMap<String, String> {
    Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(q)| q)
        .unwrap_or_default()
}

// =============================================================================
// MASTER KEY
// =============================================================================

/// An authenticated master key.
#[derive(Debug, Clone)]
pub struct MasterKey(pub KeyRow);

impl<S> FromRequestParts<S> for MasterKey
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let key = credential(&parts.headers, &query_params(parts), MASTER_KEY_HEADER, MASTER_KEY_PARAM);
        let row = keys::authenticate(&app_state.pool, key.as_deref()).await?;
        Ok(Self(row))
    }
}

// =============================================================================
// FILE ID
// =============================================================================

/// The numeric `{id}` of a file route. Anything else is a 400 `invalid_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileId(pub i64);

impl<S> FromRequestParts<S> for FileId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("invalid_id"))?;
        params
            .get("id")
            .and_then(|id| id.parse().ok())
            .map(Self)
            .ok_or_else(|| ApiError::bad_request("invalid_id"))
    }
}

// =============================================================================
// CHANNEL ACCESS
// =============================================================================

/// A channel the caller may read and write.
#[derive(Debug, Clone)]
pub struct ChannelAccess {
    pub channel: String,
}

impl<S> FromRequestParts<S> for ChannelAccess
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let query = query_params(parts);

        let key = credential(&parts.headers, &query, MASTER_KEY_HEADER, MASTER_KEY_PARAM);
        keys::authenticate(&app_state.pool, key.as_deref())
            .await
            .map_err(|e| match e {
                KeyError::Missing => KeyError::Invalid,
                other => other,
            })?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("invalid_channel"))?;
        let channel = params
            .get("channel")
            .filter(|c| !c.is_empty())
            .cloned()
            .ok_or_else(|| ApiError::bad_request("invalid_channel"))?;

        let password = credential(&parts.headers, &query, CHANNEL_PASSWORD_HEADER, CHANNEL_PASSWORD_PARAM);
        channel::authorize(&app_state.pool, app_state.upload_dir(), &channel, password.as_deref()).await?;

        Ok(Self { channel })
    }
}
