//! Root application component with routing and the credential gate.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::use_location;
use leptos_router::{
    NavigateOptions, StaticSegment, WildcardSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::pages::{
    channel::ChannelPage, dashboard::DashboardPage, gate::GatePage, password_prompt::PasswordPromptPage,
};
use crate::router::routes::{self, AppRoute, RouteOutcome};
use crate::router::{CredentialGuard, RouteTransition};
use crate::state::credential::Credentials;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="chanbox"/>

        <Router>
            <main class="app">
                <Routes fallback=|| view! { <GuardedOutlet/> }>
                    <Route path=StaticSegment("") view=GuardedOutlet/>
                    <Route path=WildcardSegment("path") view=GuardedOutlet/>
                </Routes>
            </main>
        </Router>
    }
}

/// Every location goes through the credential guard before
/// [`AppRoute::parse`] picks a page, so a protected page is never mounted
/// without a stored key. Redirects replace the history entry.
#[component]
fn GuardedOutlet() -> impl IntoView {
    let location = use_location();
    let previous = StoredValue::new(String::new());

    move || {
        let to = format!("{}{}", location.pathname.get(), location.search.get());
        let from = previous.get_value();
        previous.set_value(to.clone());

        let guard = CredentialGuard::new(Credentials::browser());
        match routes::resolve(&guard, &RouteTransition { to, from }) {
            RouteOutcome::Redirect(target) => {
                let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
                view! { <Redirect path=target options=options/> }.into_any()
            }
            RouteOutcome::Render(AppRoute::Gate) => view! { <GatePage/> }.into_any(),
            RouteOutcome::Render(AppRoute::Dashboard) => view! { <DashboardPage/> }.into_any(),
            RouteOutcome::Render(AppRoute::Channel(name)) => view! { <ChannelPage name=name/> }.into_any(),
            RouteOutcome::Render(AppRoute::PasswordPrompt(name)) => view! { <PasswordPromptPage name=name/> }.into_any(),
            RouteOutcome::NotFound => "Page not found.".into_any(),
        }
    }
}
