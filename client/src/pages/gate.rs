//! Gate page: establish the master key, or open a channel once one is stored.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::router::{AppRoute, routes::normalize_channel_name};
use crate::state::credential::Credentials;

#[component]
pub fn GatePage() -> impl IntoView {
    let navigate = use_navigate();
    #[cfg(feature = "csr")]
    let api = super::use_api();

    let key_input = RwSignal::new(String::new());
    let channel_input = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let has_key = RwSignal::new(Credentials::browser().master_key().is_some());
    let revealed = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let store_key = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let key = key_input.get().trim().to_owned();
            if key.is_empty() {
                info.set("Enter the master key.".to_owned());
                return;
            }
            Credentials::browser().set_master_key(&key);
            has_key.set(true);
            navigate(&AppRoute::Dashboard.path(), NavigateOptions::default());
        }
    };

    let reveal_first_key = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            match api.master_exists().await {
                Ok(exists) if !exists.exists => info.set("The server has no master key yet.".to_owned()),
                Ok(_) => match api.peek_master_key().await {
                    Ok(key) => {
                        key_input.set(key.master_key.clone());
                        revealed.set(Some(key.master_key));
                    }
                    Err(e) => info.set(super::error_text(&e)),
                },
                Err(e) => info.set(super::error_text(&e)),
            }
            busy.set(false);
        });
    };

    let open_channel = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match normalize_channel_name(&channel_input.get()) {
            Some(name) => navigate(&AppRoute::Channel(name).path(), NavigateOptions::default()),
            None => info.set("Channel names are one path segment and cannot be \"dash\".".to_owned()),
        }
    };

    let forget_key = move |_| {
        Credentials::browser().clear_master_key();
        has_key.set(false);
        key_input.set(String::new());
    };

    view! {
        <div class="gate-page">
            <h1>"chanbox"</h1>
            <Show
                when=move || has_key.get()
                fallback=move || {
                    view! {
                        <form class="gate-form" on:submit=store_key.clone()>
                            <input
                                class="gate-input"
                                type="password"
                                placeholder="Master key"
                                prop:value=move || key_input.get()
                                on:input=move |ev| key_input.set(event_target_value(&ev))
                            />
                            <button class="btn btn--primary" type="submit">"Continue"</button>
                            <button class="btn" type="button" on:click=reveal_first_key.clone() disabled=move || busy.get()>
                                "Reveal first key"
                            </button>
                        </form>
                    }
                }
            >
                <form class="gate-form" on:submit=open_channel.clone()>
                    <input
                        class="gate-input"
                        type="text"
                        placeholder="Channel name"
                        prop:value=move || channel_input.get()
                        on:input=move |ev| channel_input.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit">"Open channel"</button>
                </form>
                <nav class="gate-links">
                    <a href=AppRoute::Dashboard.path()>"Dashboard"</a>
                    <button class="btn btn--link" on:click=forget_key.clone()>"Forget key"</button>
                </nav>
            </Show>
            <Show when=move || revealed.get().is_some()>
                <p class="gate-message gate-message--key">
                    "First master key: "
                    <code>{move || revealed.get().unwrap_or_default()}</code>
                </p>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="gate-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
