//! Networking modules for the chanbox REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the interceptor-aware client, `interceptor` holds the
//! master-key and access-redirect hooks, `transport` sends requests from the
//! browser, `api` wraps each endpoint, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod interceptor;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
