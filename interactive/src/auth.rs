use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use social_shared::Session;
use wasm_bindgen_futures::spawn_local;

use crate::account::AccountWindow;
use crate::state::AppState;

/// Header button for anonymous visitors.
#[component]
pub fn LoginButton() -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <button class="social-btn social-btn-primary" on:click=move |_| open.set(true)>
            "Log In"
        </button>
        <Show when=move || open.get()>
            <LoginWindow on_close=Callback::new(move |_| open.set(false)) />
        </Show>
    }
}

/// Log in, or sign up and then log in.
#[component]
pub fn LoginWindow(on_close: Callback<()>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let sign_up = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let on_submit = {
        let session = state.session.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            submitting.set(true);
            let session = session.clone();
            let (n, e, p) = (name.get_untracked(), email.get_untracked(), password.get_untracked());
            let creating = sign_up.get_untracked();
            spawn_local(async move {
                let result = if creating {
                    session.signup(&n, &e, &p).await
                } else {
                    session.login(&e, &p).await
                };
                submitting.set(false);
                if result.is_ok() {
                    on_close.run(());
                }
            });
        }
    };

    view! {
        <div class="social-modal-backdrop">
            <form class="social-modal" on:submit=on_submit>
                <h3 class="social-modal-title">
                    {move || if sign_up.get() { "Sign Up" } else { "Log In" }}
                </h3>
                <Show when=move || sign_up.get()>
                    <label class="social-field">
                        <span>"Name"</span>
                        <input
                            type="text"
                            class="social-input"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </label>
                </Show>
                <label class="social-field">
                    <span>"Email"</span>
                    <input
                        type="email"
                        class="social-input"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="social-field">
                    <span>"Password"</span>
                    <input
                        type="password"
                        class="social-input"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <div class="social-modal-actions">
                    <button
                        type="button"
                        class="social-btn social-btn-text"
                        on:click=move |_| sign_up.update(|s| *s = !*s)
                    >
                        {move || if sign_up.get() { "Have an account? Log in" } else { "New here? Sign up" }}
                    </button>
                    <button type="button" class="social-btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="social-btn social-btn-primary" disabled=move || submitting.get()>
                        {move || if sign_up.get() { "Sign Up" } else { "Log In" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Avatar in the header. Signed-in users get a menu with the account
/// window and logout.
#[component]
pub fn AvatarMenu() -> impl IntoView {
    let state = expect_context::<AppState>();
    let session = state.session_signal();
    let menu_open = RwSignal::new(false);
    let account_open = RwSignal::new(false);

    let avatar = {
        let config = state.config().clone();
        move || {
            session.with(|s| {
                s.user()
                    .and_then(|u| u.profile_image.as_ref())
                    .map(|img| config.resolve_url(&img.url))
            })
        }
    };
    let greeting = move || {
        session.with(|s| s.user().map(|u| format!("Hi {}", u.name)).unwrap_or_default())
    };

    let on_logout = {
        let sessions = state.session.clone();
        move |_: leptos::ev::MouseEvent| {
            menu_open.set(false);
            sessions.logout();
        }
    };

    view! {
        <div class="social-avatar-menu">
            <button
                class="social-avatar-btn"
                on:click=move |_| {
                    if session.with(Session::is_authenticated) {
                        menu_open.update(|o| *o = !*o);
                    }
                }
            >
                {move || match avatar() {
                    Some(src) => view! { <img class="social-avatar" src=src alt="" width="32" height="32" /> }.into_any(),
                    None => view! { <span class="social-avatar social-avatar-blank">"\u{1F464}"</span> }.into_any(),
                }}
            </button>
            <Show when=move || menu_open.get() && session.with(Session::is_authenticated)>
                <div class="social-menu">
                    <p class="social-menu-greeting">{greeting}</p>
                    <button
                        class="social-btn social-btn-text"
                        on:click=move |_| {
                            menu_open.set(false);
                            account_open.set(true);
                        }
                    >
                        "Account"
                    </button>
                    <button class="social-btn social-btn-text" on:click=on_logout.clone()>
                        "Log Out"
                    </button>
                </div>
            </Show>
            <Show when=move || account_open.get()>
                <AccountWindow on_close=Callback::new(move |_| account_open.set(false)) />
            </Show>
        </div>
    }
}
