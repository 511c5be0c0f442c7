//! Browser transport over `gloo-net`.
//!
//! Only the `csr` build has a real transport; native builds use test doubles.

#[cfg(feature = "csr")]
use super::http::{ApiError, HttpBody, HttpRequest, HttpResponse, Method, Transport};

/// `fetch`-backed transport. Any HTTP status is returned as a response; only
/// failures to reach the server or read the body are errors.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "csr")]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            HttpBody::Empty => builder.build(),
            HttpBody::Json(payload) => builder.header("Content-Type", "application/json").body(payload),
            HttpBody::Form(form) => builder.body(form),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
