//! # client
//!
//! Leptos + WASM front end for chanbox.
//!
//! This crate contains the authenticated HTTP client (master-key header
//! injection plus 401/403 redirects), the client-side router with its
//! credential guard, the browser credential store, and the route-level pages.
//! Everything except the `csr` entry point and the `gloo-net` transport
//! compiles natively so the interceptor and guard logic is unit-tested
//! without a browser.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
