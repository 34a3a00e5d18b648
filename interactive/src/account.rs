use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use social_shared::images::check_limit;
use social_shared::notice::IMAGE_LIMIT_KEY;
use social_shared::{AccountChanges, Notice, PendingImage};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::compose::ImagePicker;
use crate::state::AppState;

/// View and edit the signed-in account. Saving asks for the password again.
#[component]
pub fn AccountWindow(on_close: Callback<()>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let user = state.session.user();
    let current_avatar = user
        .as_ref()
        .and_then(|u| u.profile_image.as_ref())
        .map(|img| state.config().resolve_url(&img.url));

    let name = RwSignal::new(user.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = RwSignal::new(user.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let password = RwSignal::new(String::new());
    let editing = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let new_image: RwSignal<Option<PendingImage>> = RwSignal::new(None);

    on_cleanup(move || {
        new_image.try_with_untracked(|img| img.iter().for_each(api::release_preview));
    });

    let preview = move || {
        new_image
            .with(|img| img.as_ref().map(|p| p.preview_url.clone()))
            .or_else(|| current_avatar.clone())
    };

    let on_pick = {
        let client = state.client.clone();
        Callback::new(move |picked: Vec<PendingImage>| {
            if let Err(err) = check_limit(0, picked.len(), 1, true) {
                picked.iter().for_each(api::release_preview);
                client.notifier().notify(Notice::error(IMAGE_LIMIT_KEY, err.to_string()));
                return;
            }
            let replaced = new_image.try_update(|slot| std::mem::replace(slot, picked.into_iter().next()));
            if let Some(Some(old)) = replaced {
                api::release_preview(&old);
            }
        })
    };

    let on_submit = {
        let session = state.session.clone();
        let feed = state.feed.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            saving.set(true);
            let session = session.clone();
            let feed = feed.clone();
            let changes = AccountChanges {
                name: name.get_untracked(),
                email: email.get_untracked(),
                profile_image: new_image.get_untracked().map(|p| p.file),
            };
            let confirm = password.get_untracked();
            spawn_local(async move {
                let result = session.update_account(changes, &confirm, &feed).await;
                saving.set(false);
                if result.is_ok() {
                    password.set(String::new());
                    editing.set(false);
                    on_close.run(());
                }
            });
        }
    };

    view! {
        <div class="social-modal-backdrop">
            <form class="social-modal" on:submit=on_submit>
                <h3 class="social-modal-title">"Account"</h3>
                <div class="social-account-avatar">
                    {move || match preview() {
                        Some(src) => view! { <img class="social-avatar social-avatar-lg" src=src alt="" /> }.into_any(),
                        None => view! { <span class="social-avatar social-avatar-lg social-avatar-blank">"\u{1F464}"</span> }.into_any(),
                    }}
                    <Show when=move || editing.get()>
                        <ImagePicker
                            label="Change Picture"
                            multiple=false
                            disabled=Signal::derive(move || saving.get())
                            on_pick=on_pick
                        />
                    </Show>
                </div>
                <label class="social-field">
                    <span>"Name"</span>
                    <input
                        type="text"
                        class="social-input"
                        disabled=move || !editing.get()
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="social-field">
                    <span>"Email"</span>
                    <input
                        type="email"
                        class="social-input"
                        disabled=move || !editing.get()
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || editing.get()>
                    <label class="social-field">
                        <span>"Confirm Password"</span>
                        <input
                            type="password"
                            class="social-input"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                </Show>
                <div class="social-modal-actions">
                    <button
                        type="button"
                        class="social-btn"
                        on:click=move |_| editing.update(|e| *e = !*e)
                    >
                        {move || if editing.get() { "Cancel Changes" } else { "Change Account Details" }}
                    </button>
                    <Show when=move || editing.get()>
                        <button type="submit" class="social-btn social-btn-primary" disabled=move || saving.get()>
                            "Save Changes"
                        </button>
                    </Show>
                    <button type="button" class="social-btn" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                </div>
            </form>
        </div>
    }
}
