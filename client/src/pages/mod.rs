//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are thin views: they read input, call the typed API, and render the
//! result. Re-authentication and password challenges happen inside the HTTP
//! client, so pages only display error text.


pub mod channel;
pub mod dashboard;
pub mod gate;
pub mod password_prompt;

use crate::net::http::ApiError;

/// Typed API over the browser transport.
#[cfg(feature = "csr")]
pub(crate) type BrowserApi = crate::net::api::Api<crate::net::transport::GlooTransport>;

/// Authenticated API for the current page, navigating through the router.
///
/// Must be called inside `<Router>`. The handle is thread-local, so it is
/// kept in a local `StoredValue` and cloned into event handlers.
#[cfg(feature = "csr")]
pub(crate) fn use_api() -> leptos::prelude::StoredValue<BrowserApi, leptos::prelude::LocalStorage> {
    use std::rc::Rc;

    use crate::config::{AppConfig, browser_origin};
    use crate::net::http::HttpClient;
    use crate::net::transport::GlooTransport;
    use crate::router::{BrowserNavigator, CredentialGuard};
    use crate::state::credential::Credentials;

    let credentials = Credentials::browser();
    let navigator = BrowserNavigator::new(
        leptos_router::hooks::use_navigate(),
        CredentialGuard::new(credentials.clone()),
    );
    let config = AppConfig::load();
    let http = HttpClient::authenticated(
        GlooTransport,
        config.api_base_url,
        credentials.clone(),
        Rc::new(navigator),
        browser_origin(),
    );
    leptos::prelude::StoredValue::new_local(crate::net::api::Api::new(http, credentials))
}

/// Message shown to the user for a failed call.
#[must_use]
pub fn error_text(error: &ApiError) -> String {
    let Some(code) = error.error_code() else {
        return error.to_string();
    };
    match code.as_str() {
        "missing_master_key" | "invalid_master_key" => "Master key rejected.".to_owned(),
        "expired_master_key" => "This master key has expired.".to_owned(),
        "password_required" => "This channel needs a password.".to_owned(),
        "channel_expired" => "This channel has expired.".to_owned(),
        "file_expired" => "That file has expired.".to_owned(),
        "not_found" => "Not found.".to_owned(),
        "no_file" => "Choose a file first.".to_owned(),
        "visitor_cannot_rotate" => "Visitor keys cannot mint new keys.".to_owned(),
        "minutes_invalid" => "Pick one hour, one day, or one week.".to_owned(),
        other => format!("Request failed: {other}"),
    }
}
