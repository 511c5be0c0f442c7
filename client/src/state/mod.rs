//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The only cross-cutting state is the credential store. It is passed
//! explicitly into the HTTP client, navigator, and guard instead of being
//! reached through a global.

pub mod credential;
