//! Typed wrappers for each chanbox endpoint.
//!
//! Every call goes through the authenticated [`HttpClient`], so the master
//! key header and the 401/403 redirects apply uniformly. Channel calls also
//! carry the stored channel password, if any.
//!
//! ERROR HANDLING
//! ==============
//! Calls return `Result<_, ApiError>`; pages render the error text and rely
//! on the interceptor for navigation.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use url::form_urlencoded;

use super::http::{ApiError, CHANNEL_PASSWORD_HEADER, HttpClient, HttpRequest, Method, Transport};
use super::types::{
    ChannelView, Dashboard, FileList, KeyInfo, MasterExists, OkResponse, PasswordRequest, RevealedKey, RotateRequest,
    RotatedKey, SaveChannelRequest, SaveChannelResponse,
};
use crate::router::routes::encode_segment;
use crate::state::credential::Credentials;

pub struct Api<T> {
    http: Rc<HttpClient<T>>,
    credentials: Credentials,
}

impl<T> Clone for Api<T> {
    fn clone(&self) -> Self {
        Self { http: Rc::clone(&self.http), credentials: self.credentials.clone() }
    }
}

impl<T: Transport> Api<T> {
    #[must_use]
    pub fn new(http: HttpClient<T>, credentials: Credentials) -> Self {
        Self { http: Rc::new(http), credentials }
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // =========================================================================
    // MASTER KEY
    // =========================================================================

    pub async fn master_exists(&self) -> Result<MasterExists, ApiError> {
        self.http.get_json("/api/master/exists").await
    }

    /// Reveal the first master key (used by the gate on first run).
    pub async fn peek_master_key(&self) -> Result<RevealedKey, ApiError> {
        self.http.send_json(HttpRequest::post("/api/master/peek-once")).await
    }

    pub async fn key_info(&self) -> Result<KeyInfo, ApiError> {
        self.http.get_json("/api/master/me").await
    }

    /// Mint a visitor key valid for `minutes` (see `ROTATION_MINUTES`).
    pub async fn rotate_key(&self, minutes: i64) -> Result<RotatedKey, ApiError> {
        self.http.post_json("/api/master/rotate", &RotateRequest { minutes }).await
    }

    // =========================================================================
    // CHANNELS
    // =========================================================================

    pub async fn channel(&self, channel: &str) -> Result<ChannelView, ApiError> {
        self.http.send_json(self.channel_request(Method::Get, channel, "")).await
    }

    pub async fn save_channel(&self, channel: &str, request: &SaveChannelRequest) -> Result<SaveChannelResponse, ApiError> {
        let http_request = self.channel_request(Method::Post, channel, "/save").json(request)?;
        let response = self.http.send_json(http_request).await?;
        if let Some(password) = &request.password {
            self.credentials.set_channel_password(channel, password);
        }
        Ok(response)
    }

    /// Set or (with an empty string) clear the channel password, then
    /// remember the new value locally so later calls keep access.
    pub async fn set_channel_password(&self, channel: &str, password: &str) -> Result<OkResponse, ApiError> {
        let request = self
            .channel_request(Method::Post, channel, "/password")
            .json(&PasswordRequest { password: password.to_owned() })?;
        let response = self.http.send_json(request).await?;
        self.credentials.set_channel_password(channel, password);
        Ok(response)
    }

    pub async fn list_files(&self, channel: &str) -> Result<FileList, ApiError> {
        self.http.send_json(self.channel_request(Method::Get, channel, "/files")).await
    }

    pub async fn delete_file(&self, channel: &str, file_id: i64) -> Result<OkResponse, ApiError> {
        let suffix = format!("/file/{file_id}");
        self.http.send_json(self.channel_request(Method::Delete, channel, &suffix)).await
    }

    /// Upload a browser `File` as multipart `file` + `expire_minutes`.
    #[cfg(feature = "csr")]
    pub async fn upload_file(&self, channel: &str, file: &web_sys::File, expire_minutes: i64) -> Result<OkResponse, ApiError> {
        let form = web_sys::FormData::new().map_err(|e| ApiError::Encode(format!("{e:?}")))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ApiError::Encode(format!("{e:?}")))?;
        form.append_with_str("expire_minutes", &expire_minutes.to_string())
            .map_err(|e| ApiError::Encode(format!("{e:?}")))?;

        let mut request = self.channel_request(Method::Post, channel, "/upload");
        request.body = super::http::HttpBody::Form(form);
        self.http.send_json(request).await
    }

    /// Link for a plain browser download. Anchors cannot set headers, so the
    /// key and channel password travel as query parameters.
    #[must_use]
    pub fn download_url(&self, channel: &str, file_id: i64) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("master_key", &self.credentials.header_value());
        if let Some(password) = self.credentials.channel_password(channel) {
            query.append_pair("password", &password);
        }
        let path = channel_path(channel, &format!("/download/{file_id}"));
        format!("{}?{}", self.http.url(&path), query.finish())
    }

    // =========================================================================
    // HOUSEKEEPING
    // =========================================================================

    pub async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        self.http.get_json("/api/dashboard").await
    }

    /// Sweep expired channels and files now.
    pub async fn cleanup(&self) -> Result<OkResponse, ApiError> {
        self.http.send_json(HttpRequest::post("/api/cleanup")).await
    }

    fn channel_request(&self, method: Method, channel: &str, suffix: &str) -> HttpRequest {
        let request = HttpRequest::new(method, channel_path(channel, suffix));
        match self.credentials.channel_password(channel) {
            Some(password) => request.with_header(CHANNEL_PASSWORD_HEADER, &password),
            None => request,
        }
    }
}

fn channel_path(channel: &str, suffix: &str) -> String {
    format!("/api/channel/{}{suffix}", encode_segment(channel))
}
