//! Channel password prompt.
//!
//! Reached through the 403 redirect as `/:channel/password?cb=<path>`. The
//! password is stored locally and the user returns to `cb`; a wrong password
//! simply produces another 403 and lands back here.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::interceptor::RETURN_PATH_PARAM;
use crate::router::routes::password_return_path;
use crate::state::credential::Credentials;

#[component]
pub fn PasswordPromptPage(#[prop(into)] name: String) -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();

    let channel = StoredValue::new(name);
    let password = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let channel = channel.get_value();
        let cb = query.read().get(RETURN_PATH_PARAM);
        Credentials::browser().set_channel_password(&channel, &password.get());
        navigate(&password_return_path(&channel, cb.as_deref()), NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    view! {
        <div class="password-page">
            <h1>{move || format!("{} is password protected", channel.get_value())}</h1>
            <form class="password-form" on:submit=on_submit>
                <input
                    class="password-input"
                    type="password"
                    placeholder="Channel password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit">"Unlock"</button>
            </form>
            <a href="/">"Back"</a>
        </div>
    }
}
