//! Programmatic navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client's access interceptor navigates through [`Navigator`]. In
//! the browser that is [`BrowserNavigator`], which wraps the Leptos router's
//! `navigate` function; elsewhere [`MemoryNavigator`] keeps an in-memory
//! history. Both run navigation guards before committing.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos_router::NavigateOptions;
use url::form_urlencoded;

use super::guard::{CredentialGuard, GuardDecision, NavigationGuard, RouteTransition, run_guards};
use super::routes::GATE_PATH;

/// A navigation destination: a path plus query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl NavigationTarget {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Path with the URL-encoded query appended.
    #[must_use]
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{query}", self.path)
    }
}

pub trait Navigator {
    /// Navigate to `target`, subject to guards.
    fn push(&self, target: &NavigationTarget);

    /// Path, query, and fragment of the current location.
    fn current_full_path(&self) -> String;
}

// =============================================================================
// MEMORY NAVIGATOR
// =============================================================================

/// In-memory router with a guard chain and a record of committed locations.
pub struct MemoryNavigator {
    current: RefCell<String>,
    history: RefCell<Vec<String>>,
    guards: Vec<Rc<dyn NavigationGuard>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self { current: RefCell::new(initial.into()), history: RefCell::new(Vec::new()), guards: Vec::new() }
    }

    #[must_use]
    pub fn with_guard(mut self, guard: Rc<dyn NavigationGuard>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Every committed location, oldest first. The initial location is not included.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn push(&self, target: &NavigationTarget) {
        let to = target.href();
        let transition = RouteTransition { to: to.clone(), from: self.current_full_path() };
        let committed = match run_guards(&self.guards, &transition) {
            GuardDecision::Proceed => to,
            GuardDecision::Redirect(redirect) => redirect,
        };
        self.history.borrow_mut().push(committed.clone());
        *self.current.borrow_mut() = committed;
    }

    fn current_full_path(&self) -> String {
        self.current.borrow().clone()
    }
}

// =============================================================================
// BROWSER NAVIGATOR
// =============================================================================

/// Navigator over a Leptos `navigate` function (from `use_navigate()`),
/// guarded by the credential guard. Guard redirects replace the history entry.
pub struct BrowserNavigator<F> {
    navigate: F,
    guard: CredentialGuard,
}

impl<F> BrowserNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    #[must_use]
    pub fn new(navigate: F, guard: CredentialGuard) -> Self {
        Self { navigate, guard }
    }
}

impl<F> Navigator for BrowserNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn push(&self, target: &NavigationTarget) {
        let to = target.href();
        let transition = RouteTransition { to: to.clone(), from: self.current_full_path() };
        match self.guard.check(&transition) {
            GuardDecision::Proceed => (self.navigate)(&to, NavigateOptions::default()),
            GuardDecision::Redirect(redirect) => {
                (self.navigate)(&redirect, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        }
    }

    fn current_full_path(&self) -> String {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .map(|w| w.location())
                .and_then(|location| {
                    let pathname = location.pathname().ok()?;
                    let search = location.search().ok()?;
                    let hash = location.hash().ok()?;
                    Some(format!("{pathname}{search}{hash}"))
                })
                .unwrap_or_else(|| GATE_PATH.to_owned())
        }
        #[cfg(not(feature = "csr"))]
        {
            GATE_PATH.to_owned()
        }
    }
}
