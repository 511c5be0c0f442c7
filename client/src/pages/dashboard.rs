//! Dashboard page: storage usage per channel, key details, visitor-key
//! rotation, and a manual sweep.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::types::{Dashboard, KeyInfo, ROTATION_MINUTES, RotatedKey};
use crate::router::AppRoute;
use crate::util::format::{format_bytes, format_expiry, now_secs};

/// Button label for a rotation lifetime.
#[must_use]
pub fn rotation_label(minutes: i64) -> String {
    match minutes {
        60 => "1 hour".to_owned(),
        1_440 => "1 day".to_owned(),
        10_080 => "1 week".to_owned(),
        other => format!("{other} minutes"),
    }
}

/// One-line description of the caller's key.
#[must_use]
pub fn describe_key(info: &KeyInfo, now: i64) -> String {
    if info.is_permanent {
        "Permanent key".to_owned()
    } else {
        format!("Visitor key, {}", format_expiry(info.expires_at, now))
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let api = super::use_api();

    let usage = RwSignal::new(Dashboard::default());
    let key_info = RwSignal::new(None::<KeyInfo>);
    let minted = RwSignal::new(None::<RotatedKey>);
    let info = RwSignal::new(String::new());

    let refresh = move || {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            match api.key_info().await {
                Ok(me) => key_info.set(Some(me)),
                Err(e) => {
                    info.set(super::error_text(&e));
                    return;
                }
            }
            match api.dashboard().await {
                Ok(dashboard) => usage.set(dashboard),
                Err(e) => info.set(super::error_text(&e)),
            }
        });
    };

    Effect::new(move || refresh());

    let rotate = move |minutes: i64| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match api.get_value().rotate_key(minutes).await {
                Ok(key) => minted.set(Some(key)),
                Err(e) => info.set(super::error_text(&e)),
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = minutes;
    };

    let on_cleanup = move |_| {
        info.set("Sweeping...".to_owned());
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match api.get_value().cleanup().await {
                Ok(_) => {
                    info.set("Expired channels and files removed.".to_owned());
                    refresh();
                }
                Err(e) => info.set(super::error_text(&e)),
            }
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Dashboard"</h1>
                <a href=AppRoute::Gate.path()>"Open a channel"</a>
            </header>

            <section class="dashboard-page__key">
                <p>{move || key_info.get().map(|me| describe_key(&me, now_secs())).unwrap_or_default()}</p>
                <Show when=move || key_info.get().is_some_and(|me| me.can_rotate)>
                    <div class="dashboard-page__rotate">
                        "Mint a visitor key for "
                        {ROTATION_MINUTES
                            .iter()
                            .map(|minutes| {
                                let minutes = *minutes;
                                view! {
                                    <button class="btn" on:click=move |_| rotate(minutes)>
                                        {rotation_label(minutes)}
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                </Show>
                <Show when=move || minted.get().is_some()>
                    <p class="dashboard-page__minted">
                        "Visitor key: "
                        <code>{move || minted.get().map(|k| k.master_key).unwrap_or_default()}</code>
                        " ("
                        {move || minted.get().map(|k| format_expiry(Some(k.expires_at), now_secs())).unwrap_or_default()}
                        ")"
                    </p>
                </Show>
            </section>

            <section class="dashboard-page__usage">
                <h2>{move || format!("Stored files: {}", format_bytes(usage.get().total_size))}</h2>
                <ul>
                    <For each=move || usage.get().channels key=|row| row.channel.clone() let:row>
                        <li>
                            <a href=AppRoute::Channel(row.channel.clone()).path()>{row.channel.clone()}</a>
                            " "
                            <span>{format_bytes(row.total)}</span>
                        </li>
                    </For>
                </ul>
                <button class="btn" on:click=on_cleanup>"Remove expired data"</button>
            </section>

            <Show when=move || !info.get().is_empty()>
                <p class="dashboard-page__message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
