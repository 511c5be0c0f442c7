//! Request/response hooks registered on [`HttpClient`](super::http::HttpClient).
//!
//! - [`MasterKeyHeader`] stamps `x-master-key` with the stored credential.
//! - [`AccessRedirect`] turns 401 into a trip to the gate and 403 into the
//!   channel password prompt, remembering where the user was.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::rc::Rc;

use url::Url;

use super::http::{ApiError, HttpRequest, HttpResponse, MASTER_KEY_HEADER};
use crate::router::navigator::{NavigationTarget, Navigator};
use crate::router::routes::{AppRoute, GATE_PATH};
use crate::state::credential::Credentials;

/// Query parameter the password prompt reads its return path from.
pub const RETURN_PATH_PARAM: &str = "cb";

pub trait RequestInterceptor {
    fn on_request(&self, request: &mut HttpRequest);
}

pub trait ResponseInterceptor {
    fn on_response(&self, request: &HttpRequest, response: &HttpResponse) {
        let _ = (request, response);
    }

    fn on_error(&self, request: &HttpRequest, error: &ApiError);
}

// =============================================================================
// MASTER KEY HEADER
// =============================================================================

pub struct MasterKeyHeader {
    credentials: Credentials,
}

impl MasterKeyHeader {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl RequestInterceptor for MasterKeyHeader {
    fn on_request(&self, request: &mut HttpRequest) {
        // Sent even when empty; the backend answers 401 and the redirect takes over.
        request.set_header(MASTER_KEY_HEADER, &self.credentials.header_value());
    }
}

// =============================================================================
// ACCESS REDIRECT
// =============================================================================

pub struct AccessRedirect {
    navigator: Rc<dyn Navigator>,
    origin: String,
}

impl AccessRedirect {
    #[must_use]
    pub fn new(navigator: Rc<dyn Navigator>, origin: impl Into<String>) -> Self {
        Self { navigator, origin: origin.into() }
    }

    fn redirect_to_password_prompt(&self, request_url: &str) {
        match channel_from_url(request_url, &self.origin) {
            Ok(Some(channel)) => {
                let cb = self.navigator.current_full_path();
                let target = AppRoute::PasswordPrompt(channel).target().with_query(RETURN_PATH_PARAM, cb);
                self.navigator.push(&target);
            }
            Ok(None) => {}
            Err(e) => {
                // Best effort: no redirect, nothing surfaced.
                leptos::logging::debug_warn!("skipping password redirect for {request_url}: {e}");
            }
        }
    }
}

impl ResponseInterceptor for AccessRedirect {
    fn on_error(&self, request: &HttpRequest, error: &ApiError) {
        match error.status() {
            Some(401) => self.navigator.push(&NavigationTarget::new(GATE_PATH)),
            Some(403) => self.redirect_to_password_prompt(&request.url),
            _ => {}
        }
    }
}

/// Channel segment of a request URL: path segment 3 when non-empty, else 2.
///
/// Counting includes the empty segment before the leading `/`, so
/// `/api/channel/general/save` yields `general` and `/x/general` falls back
/// to `general`. Relative URLs resolve against `origin`.
pub fn channel_from_url(request_url: &str, origin: &str) -> Result<Option<String>, url::ParseError> {
    let resolved = Url::parse(origin)?.join(request_url)?;
    let parts: Vec<&str> = resolved.path().split('/').collect();
    let channel = [3, 2]
        .into_iter()
        .find_map(|index| parts.get(index).copied().filter(|segment| !segment.is_empty()));
    Ok(channel.map(str::to_owned))
}
