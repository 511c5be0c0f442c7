//! JSON error responses for the HTTP API.
//!
//! ERROR HANDLING
//! ==============
//! Every failure leaves the API as `{"error": "<code>"}` with a status picked
//! by one of the `*_error_to_status` tables below. Database and storage
//! failures are logged here, once, and reported as `internal_error`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use crate::services::ErrorCode;
use crate::services::channel::ChannelError;
use crate::services::files::FileError;
use crate::services::keys::{KeyError, ROTATION_MINUTES};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub extra: Map<String, Value>,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str) -> Self {
        Self { status, code, extra: Map::new() }
    }

    #[must_use]
    pub fn bad_request(code: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code)
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_owned(), value);
        self
    }

    #[must_use]
    pub fn body(&self) -> Value {
        let mut body = self.extra.clone();
        body.insert("error".to_owned(), Value::from(self.code));
        Value::Object(body)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

// =============================================================================
// STATUS TABLES
// =============================================================================

pub(crate) fn key_error_to_status(err: &KeyError) -> StatusCode {
    match err {
        KeyError::Missing | KeyError::Invalid | KeyError::Expired => StatusCode::UNAUTHORIZED,
        KeyError::VisitorCannotRotate => StatusCode::FORBIDDEN,
        KeyError::MinutesInvalid => StatusCode::BAD_REQUEST,
        KeyError::NotInitialized | KeyError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn channel_error_to_status(err: &ChannelError) -> StatusCode {
    match err {
        ChannelError::Expired => StatusCode::GONE,
        ChannelError::PasswordRequired => StatusCode::FORBIDDEN,
        ChannelError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn file_error_to_status(err: &FileError) -> StatusCode {
    match err {
        FileError::NoFile => StatusCode::BAD_REQUEST,
        FileError::NotFound => StatusCode::NOT_FOUND,
        FileError::Expired => StatusCode::GONE,
        FileError::Io(_) | FileError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_internal(status: StatusCode, err: &dyn std::error::Error) {
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<KeyError> for ApiError {
    fn from(err: KeyError) -> Self {
        let status = key_error_to_status(&err);
        log_internal(status, &err);
        let api = Self::new(status, err.error_code());
        if matches!(err, KeyError::MinutesInvalid) {
            return api.with("allowed", json!(ROTATION_MINUTES));
        }
        api
    }
}

impl From<ChannelError> for ApiError {
    fn from(err: ChannelError) -> Self {
        let status = channel_error_to_status(&err);
        log_internal(status, &err);
        Self::new(status, err.error_code())
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        let status = file_error_to_status(&err);
        log_internal(status, &err);
        Self::new(status, err.error_code())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "database query failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
    }
}
