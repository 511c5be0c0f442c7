//! Interceptor-aware HTTP client.
//!
//! DESIGN
//! ======
//! `HttpClient` owns a [`Transport`] and two hook chains. For each call it
//! runs every request interceptor, sends once, then runs every response
//! interceptor exactly once: `on_response` for 2xx, `on_error` otherwise.
//! Errors are always returned to the caller after the hooks have run.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Http`] with a trimmed, truncated body
//! so UI code can show the message without risking huge payloads.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::interceptor::{AccessRedirect, MasterKeyHeader, RequestInterceptor, ResponseInterceptor};
use crate::router::navigator::Navigator;
use crate::state::credential::Credentials;

/// Header carrying the master key on every request.
pub const MASTER_KEY_HEADER: &str = "x-master-key";
/// Header carrying a channel password on channel requests.
pub const CHANNEL_PASSWORD_HEADER: &str = "x-channel-password";

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("unable to reach the server: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// HTTP status of the failed exchange, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `{"error": "<code>"}` value, when the body carried one.
    #[must_use]
    pub fn error_code(&self) -> Option<String> {
        let Self::Http { message, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(message).ok()?;
        value.get("error")?.as_str().map(str::to_owned)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Clone, Debug, Default)]
pub enum HttpBody {
    #[default]
    Empty,
    Json(String),
    /// Multipart form built in the browser (file uploads).
    #[cfg(feature = "csr")]
    Form(web_sys::FormData),
}

#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    /// The path or URL as the caller wrote it, before the base URL is applied.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: HttpBody::Empty }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Encode `body` as the JSON payload.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let payload = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = HttpBody::Json(payload);
        Ok(self)
    }

    /// Set a header, replacing any existing value under the same name
    /// (names compare case-insensitively).
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends a fully-resolved request. Only transport failures are errors here;
/// any HTTP status is a successful exchange.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Clone)]
pub struct HttpClient<T> {
    transport: T,
    base_url: String,
    request_interceptors: Vec<Rc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Rc<dyn ResponseInterceptor>>,
}

impl<T: Transport> HttpClient<T> {
    /// A bare client with no interceptors.
    #[must_use]
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// A client that sends the master key on every request and redirects on
    /// 401/403. `origin` resolves relative request URLs for the 403 handler.
    #[must_use]
    pub fn authenticated(
        transport: T,
        base_url: impl Into<String>,
        credentials: Credentials,
        navigator: Rc<dyn Navigator>,
        origin: impl Into<String>,
    ) -> Self {
        Self::new(transport, base_url)
            .with_request_interceptor(Rc::new(MasterKeyHeader::new(credentials)))
            .with_response_interceptor(Rc::new(AccessRedirect::new(navigator, origin)))
    }

    #[must_use]
    pub fn with_request_interceptor(mut self, interceptor: Rc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    #[must_use]
    pub fn with_response_interceptor(mut self, interceptor: Rc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Absolute (or same-origin relative) URL for `path` under the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url(&self.base_url, path)
    }

    /// Run the interceptor chains around a single exchange.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        for interceptor in &self.request_interceptors {
            interceptor.on_request(&mut request);
        }

        let mut outgoing = request.clone();
        outgoing.url = self.url(&request.url);

        let result = match self.transport.send(outgoing).await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => Err(ApiError::Http { status: response.status, message: sanitize_body(&response.body) }),
            Err(error) => Err(error),
        };

        match result {
            Ok(response) => {
                for interceptor in &self.response_interceptors {
                    interceptor.on_response(&request, &response);
                }
                Ok(response)
            }
            Err(error) => {
                for interceptor in &self.response_interceptors {
                    interceptor.on_error(&request, &error);
                }
                Err(error)
            }
        }
    }

    /// Send and decode a JSON response body.
    pub async fn send_json<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        self.send(request).await?.json()
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send_json(HttpRequest::get(path)).await
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.send_json(HttpRequest::post(path).json(body)?).await
    }
}

/// Join a base URL and a path. An empty base keeps the path relative, and
/// absolute URLs pass through untouched.
#[must_use]
pub fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_owned()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
