//! Channel page: shared text content, password, and file drops.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use leptos::prelude::*;

use crate::net::types::{ChannelView, DEFAULT_EXPIRE_MINUTES, FileEntry};
use crate::util::format::{format_bytes, format_expiry, now_secs};

/// Lifetime choices offered for saved content and uploads, in minutes.
/// `0` keeps the item until deleted.
pub const EXPIRE_CHOICES: [(i64, &str); 5] =
    [(10, "10 minutes"), (60, "1 hour"), (1_440, "1 day"), (10_080, "1 week"), (0, "Never")];

/// Parse a lifetime picked in the UI, falling back to the default.
#[must_use]
pub fn parse_expire_minutes(raw: &str) -> i64 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|minutes| *minutes >= 0)
        .unwrap_or(DEFAULT_EXPIRE_MINUTES)
}

/// `name` is the decoded channel segment.
#[component]
pub fn ChannelPage(#[prop(into)] name: String) -> impl IntoView {
    let channel = Memo::new(move |_| name.clone());
    #[cfg(feature = "csr")]
    let api = super::use_api();

    let view_state = RwSignal::new(ChannelView::default());
    let content = RwSignal::new(String::new());
    let expire_minutes = RwSignal::new(DEFAULT_EXPIRE_MINUTES);
    let new_password = RwSignal::new(String::new());
    let files = RwSignal::new(Vec::<FileEntry>::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    // Reload whenever the channel segment changes.
    let reload = move || {
        let name = channel.get_untracked();
        if name.is_empty() {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            match api.channel(&name).await {
                Ok(loaded) => {
                    content.set(loaded.content.clone());
                    view_state.set(loaded);
                }
                Err(e) => {
                    info.set(super::error_text(&e));
                    return;
                }
            }
            match api.list_files(&name).await {
                Ok(list) => files.set(list.files),
                Err(e) => info.set(super::error_text(&e)),
            }
        });
    };

    Effect::new(move || {
        channel.track();
        info.set(String::new());
        reload();
    });

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Saving...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let request = crate::net::types::SaveChannelRequest {
                content: content.get_untracked(),
                expire_minutes: expire_minutes.get_untracked(),
                password: None,
            };
            match api.get_value().save_channel(&channel.get_untracked(), &request).await {
                Ok(saved) => {
                    view_state.update(|v| v.expire_at = saved.expire_at);
                    info.set("Saved.".to_owned());
                }
                Err(e) => info.set(super::error_text(&e)),
            }
            busy.set(false);
        });
    };

    let on_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let password = new_password.get();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match api.get_value().set_channel_password(&channel.get_untracked(), &password).await {
                Ok(_) => {
                    view_state.update(|v| v.password_set = !password.is_empty());
                    new_password.set(String::new());
                    info.set(if password.is_empty() { "Password removed." } else { "Password set." }.to_owned());
                }
                Err(e) => info.set(super::error_text(&e)),
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = password;
    };

    let on_upload = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }

        #[cfg(feature = "csr")]
        {
            let Some(file) = file_input.get().and_then(|input| input.files()).and_then(|list| list.get(0)) else {
                info.set("Choose a file first.".to_owned());
                return;
            };
            busy.set(true);
            info.set(format!("Uploading {}...", file.name()));
            leptos::task::spawn_local(async move {
                let api = api.get_value();
                let name = channel.get_untracked();
                match api.upload_file(&name, &file, expire_minutes.get_untracked()).await {
                    Ok(_) => {
                        info.set("Uploaded.".to_owned());
                        if let Some(input) = file_input.get_untracked() {
                            input.set_value("");
                        }
                        if let Ok(list) = api.list_files(&name).await {
                            files.set(list.files);
                        }
                    }
                    Err(e) => info.set(super::error_text(&e)),
                }
                busy.set(false);
            });
        }
    };

    let on_delete = move |file_id: i64| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match api.get_value().delete_file(&channel.get_untracked(), file_id).await {
                Ok(_) => files.update(|list| list.retain(|f| f.id != file_id)),
                Err(e) => info.set(super::error_text(&e)),
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = file_id;
    };

    let download_href = move |file_id: i64| {
        #[cfg(feature = "csr")]
        {
            api.with_value(|api| api.download_url(&channel.get_untracked(), file_id))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = file_id;
            String::new()
        }
    };

    view! {
        <div class="channel-page">
            <header class="channel-page__header">
                <h1>{move || channel.get()}</h1>
                <span class="channel-page__expiry">
                    {move || format_expiry(view_state.get().expire_at, now_secs())}
                </span>
                <a href="/dash">"Dashboard"</a>
            </header>

            <form class="channel-form" on:submit=on_save>
                <textarea
                    class="channel-form__content"
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
                <select on:change=move |ev| expire_minutes.set(parse_expire_minutes(&event_target_value(&ev)))>
                    {EXPIRE_CHOICES
                        .iter()
                        .map(|(minutes, label)| {
                            let minutes = *minutes;
                            view! {
                                <option value=minutes.to_string() selected=move || expire_minutes.get() == minutes>
                                    {*label}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Save"</button>
            </form>

            <form class="channel-form channel-form--password" on:submit=on_password>
                <input
                    type="password"
                    placeholder=move || {
                        if view_state.get().password_set { "New password (empty removes it)" } else { "Set a password" }
                    }
                    prop:value=move || new_password.get()
                    on:input=move |ev| new_password.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Update password"</button>
            </form>

            <form class="channel-form channel-form--upload" on:submit=on_upload>
                <input type="file" node_ref=file_input/>
                <button class="btn" type="submit" disabled=move || busy.get()>"Upload"</button>
            </form>

            <ul class="channel-files">
                <For each=move || files.get() key=|file| file.id let:file>
                    <li class="channel-files__item">
                        <a href=download_href(file.id)>{file.name.clone()}</a>
                        <span>{format_bytes(file.size)}</span>
                        <span>{format_expiry(file.expire_at, now_secs())}</span>
                        <button class="btn btn--link" on:click=move |_| on_delete(file.id)>"Delete"</button>
                    </li>
                </For>
            </ul>

            <Show when=move || !info.get().is_empty()>
                <p class="channel-page__message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
