//! Navigation guard gating every route except the gate on credential presence.
//!
//! The guard only checks that a master key is stored. Whether the key is
//! valid is discovered later, when an API call comes back 401/403 and the
//! HTTP client's access interceptor redirects.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use super::routes::{GATE_PATH, path_only};
use crate::state::credential::Credentials;

/// A pending navigation, evaluated before it commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTransition {
    /// Full target path (may include a query string).
    pub to: String,
    /// Full path of the current location.
    pub from: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// Abort the transition and navigate here instead.
    Redirect(String),
}

pub trait NavigationGuard {
    fn check(&self, transition: &RouteTransition) -> GuardDecision;
}

/// Redirects to the gate when no master key is stored.
#[derive(Clone)]
pub struct CredentialGuard {
    credentials: Credentials,
}

impl CredentialGuard {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl NavigationGuard for CredentialGuard {
    fn check(&self, transition: &RouteTransition) -> GuardDecision {
        if self.credentials.master_key().is_none() && path_only(&transition.to) != GATE_PATH {
            return GuardDecision::Redirect(GATE_PATH.to_owned());
        }
        GuardDecision::Proceed
    }
}

/// Run guards in order; the first redirect wins.
#[must_use]
pub fn run_guards(guards: &[Rc<dyn NavigationGuard>], transition: &RouteTransition) -> GuardDecision {
    guards
        .iter()
        .map(|guard| guard.check(transition))
        .find(|decision| *decision != GuardDecision::Proceed)
        .unwrap_or(GuardDecision::Proceed)
}
