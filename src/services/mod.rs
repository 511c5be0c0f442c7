//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod channel;
pub mod cleanup;
pub mod expiry;
pub mod files;
pub mod keys;

/// Stable machine-readable code for an error, sent as `{"error": "<code>"}`.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
