use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use social_shared::images::ALLOWED_IMAGE_TYPES;
use social_shared::notice::{COMPOSE_KEY, IMAGE_LIMIT_KEY};
use social_shared::{ComposeError, ComposeImage, ComposeVariant, ComposeWindow, Notice, PendingImage, Submitted};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

use crate::api;
use crate::carousel::ImageCarousel;
use crate::state::AppState;

/// Hidden file input behind a button. Picked files are read into memory
/// before `on_pick` sees them.
#[component]
pub fn ImagePicker(
    label: &'static str,
    multiple: bool,
    disabled: Signal<bool>,
    on_pick: Callback<Vec<PendingImage>>,
) -> impl IntoView {
    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(files) = input.files() else {
            return;
        };
        spawn_local(async move {
            let mut picked = Vec::new();
            for i in 0..files.length() {
                let Some(file) = files.get(i) else { continue };
                match api::read_file(&file).await {
                    Ok(image) => picked.push(image),
                    Err(err) => tracing::warn!(file = %file.name(), error = %err, "could not read file"),
                }
            }
            // Let the same file be picked again later.
            input.set_value("");
            if !picked.is_empty() {
                on_pick.run(picked);
            }
        });
    };

    view! {
        <label class="social-btn social-btn-sm social-file-btn" class:disabled=move || disabled.get()>
            <input
                type="file"
                class="social-file-input"
                accept=ALLOWED_IMAGE_TYPES.join(",")
                multiple=multiple
                disabled=move || disabled.get()
                on:change=on_change
            />
            {label}
        </label>
    }
}

/// Modal form for every create/edit variant. Closes itself through
/// `on_close` once the submission went through.
#[component]
pub fn ComposeDialog(
    variant: ComposeVariant,
    on_close: Callback<()>,
    #[prop(optional)] on_submitted: Option<Callback<Submitted>>,
) -> impl IntoView {
    let state = expect_context::<AppState>();
    let heading = variant.heading();
    let body_label = variant.body_label();
    let is_post = variant.is_post();
    let window = RwSignal::new(ComposeWindow::open(variant, state.config().max_images));
    let submitting = RwSignal::new(false);

    on_cleanup(move || {
        window.try_with_untracked(|w| {
            for image in w.images.items() {
                if let ComposeImage::Pending(pending) = image {
                    api::release_preview(pending);
                }
            }
        });
    });

    let previews = {
        let config = state.config().clone();
        Signal::derive(move || {
            window.with(|w| w.images.items().iter().map(|i| i.preview_url(&config)).collect::<Vec<_>>())
        })
    };

    let on_pick = {
        let client = state.client.clone();
        Callback::new(move |picked: Vec<PendingImage>| {
            if let Some(Err(err)) = window.try_update(|w| w.add_images(picked.clone())) {
                picked.iter().for_each(api::release_preview);
                let key = match err {
                    ComposeError::ImageLimit(_) => IMAGE_LIMIT_KEY,
                    _ => COMPOSE_KEY,
                };
                client.notifier().notify(Notice::error(key, err.to_string()));
            }
        })
    };

    let on_remove = move |_| {
        if let Some(Some(ComposeImage::Pending(pending))) = window.try_update(|w| w.remove_current_image()) {
            api::release_preview(&pending);
        }
    };

    let on_submit = {
        let client = state.client.clone();
        let feed = state.feed.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            submitting.set(true);
            let compose = window.get_untracked();
            let client = client.clone();
            let feed = feed.clone();
            spawn_local(async move {
                let result = compose.submit(&client, &feed).await;
                submitting.set(false);
                match result {
                    Ok(done) => {
                        on_close.run(());
                        if let Some(cb) = on_submitted {
                            cb.run(done);
                        }
                    }
                    // Already reported by the client.
                    Err(ComposeError::Api(_)) => {}
                    Err(err) => client.notifier().notify(Notice::error(COMPOSE_KEY, err.to_string())),
                }
            });
        }
    };

    view! {
        <div class="social-modal-backdrop">
            <form class="social-modal" on:submit=on_submit>
                <h3 class="social-modal-title">{heading}</h3>
                {is_post.then(|| view! {
                    <label class="social-field">
                        <span>"Title"</span>
                        <input
                            type="text"
                            class="social-input"
                            prop:value=move || window.with(|w| w.title.clone())
                            on:input=move |ev| window.update(|w| w.title = event_target_value(&ev))
                        />
                    </label>
                })}
                <label class="social-field">
                    <span>{body_label}</span>
                    <textarea
                        class="social-textarea"
                        rows="4"
                        prop:value=move || window.with(|w| w.body.clone())
                        on:input=move |ev| window.update(|w| w.body = event_target_value(&ev))
                    ></textarea>
                </label>
                <Show when=move || previews.with(|p| !p.is_empty())>
                    <ImageCarousel
                        urls=previews
                        index=Signal::derive(move || window.with(|w| w.images.index()))
                        on_prev=Callback::new(move |_| window.update(|w| w.images.prev()))
                        on_next=Callback::new(move |_| window.update(|w| w.images.next()))
                    />
                    <button type="button" class="social-btn social-btn-sm" on:click=on_remove>
                        "Remove Image"
                    </button>
                </Show>
                <div class="social-modal-actions">
                    <span class="social-muted">
                        {move || format!("{}/{}", previews.with(Vec::len), window.with(|w| w.max_images()))}
                    </span>
                    <ImagePicker
                        label="Add Images"
                        multiple=true
                        disabled=Signal::derive(move || !window.with(|w| w.can_add_images()))
                        on_pick=on_pick
                    />
                    <button type="button" class="social-btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="social-btn social-btn-primary" disabled=move || submitting.get()>
                        "Submit"
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Header button that opens the new-post dialog.
#[component]
pub fn CreatePostButton() -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <button class="social-btn social-btn-primary" on:click=move |_| open.set(true)>
            "Create"
        </button>
        <Show when=move || open.get()>
            <ComposeDialog variant=ComposeVariant::CreatePost on_close=Callback::new(move |_| open.set(false)) />
        </Show>
    }
}
