//! Client-side routing: route table, navigation guard, and navigators.
//!
//! ARCHITECTURE
//! ============
//! `routes` maps paths to [`AppRoute`]s, `guard` decides whether a transition
//! may commit, and `navigator` performs programmatic navigation through the
//! guard. The HTTP client only sees the [`Navigator`] trait.

pub mod guard;
pub mod navigator;
pub mod routes;

pub use guard::{CredentialGuard, GuardDecision, NavigationGuard, RouteTransition};
pub use navigator::{BrowserNavigator, MemoryNavigator, NavigationTarget, Navigator};
pub use routes::{AppRoute, GATE_PATH};
