use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use social_shared::{FeedRefresher, FilterCriteria, FilterForm, Session};
use wasm_bindgen_futures::spawn_local;

use crate::auth::{AvatarMenu, LoginButton};
use crate::compose::CreatePostButton;
use crate::notices::Toasts;
use crate::posts::PostList;
use crate::state::AppState;

/// The whole page: header, filters, feed and toasts.
#[component]
pub fn FeedApp() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="social-app">
            <Header />
            <main class="social-main">
                <FilterPanel />
                <PostList />
            </main>
            <Toasts board=state.notices />
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let session = state.session_signal();

    view! {
        <header class="social-header">
            <a class="social-brand" href="/">
                <span class="social-logo">"\u{1F310}"</span>
                <span>"Social App"</span>
            </a>
            <SearchBar />
            <div class="social-header-actions">
                <Show
                    when=move || session.with(Session::is_authenticated)
                    fallback=|| view! { <LoginButton /> }
                >
                    <CreatePostButton />
                </Show>
                <AvatarMenu />
            </div>
        </header>
    }
}

/// Quick title search. Replaces any criteria set in the filter panel.
#[component]
fn SearchBar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let title = RwSignal::new(String::new());

    let on_submit = {
        let feed = state.feed.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let feed = feed.clone();
            let criteria = FilterCriteria::title_only(&title.get_untracked());
            spawn_local(async move {
                let _ = feed.refresh(criteria).await;
            });
        }
    };

    view! {
        <form class="social-search" on:submit=on_submit>
            <input
                type="search"
                class="social-input"
                placeholder="Search"
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <button type="submit" class="social-btn social-btn-sm">"\u{1F50D}"</button>
        </form>
    }
}

#[component]
fn FilterPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let session = state.session_signal();
    let form = RwSignal::new(FilterForm::default());
    let menu_open = RwSignal::new(false);
    let active = move || form.with(FilterForm::active_filter_count);

    let on_apply = {
        let feed = state.feed.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let feed = feed.clone();
            let current = form.get_untracked();
            spawn_local(async move {
                let _ = current.apply(&feed).await;
                menu_open.set(false);
            });
        }
    };

    let on_reset = {
        let feed = state.feed.clone();
        move |_: leptos::ev::MouseEvent| {
            let feed = feed.clone();
            let mut cleared = form.get_untracked();
            spawn_local(async move {
                let _ = cleared.reset(&feed).await;
                form.set(cleared);
                menu_open.set(false);
            });
        }
    };

    view! {
        <div class="social-filters">
            <div class="social-filters-bar">
                <button class="social-btn social-btn-sm" on:click=move |_| menu_open.update(|o| *o = !*o)>
                    "Filters"
                </button>
                <Show when=move || { active() > 0 }>
                    <button class="social-btn social-btn-sm social-btn-text" on:click=on_reset.clone()>
                        {move || form.with(FilterForm::reset_label)}
                    </button>
                </Show>
            </div>
            <Show when=move || menu_open.get()>
                <form class="social-filter-form" on:submit=on_apply.clone()>
                    <label class="social-field">
                        <span>"Title"</span>
                        <input
                            type="text"
                            class="social-input"
                            prop:value=move || form.with(|f| f.title.clone())
                            on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                        />
                    </label>
                    <label class="social-field">
                        <span>"Username"</span>
                        <input
                            type="text"
                            class="social-input"
                            prop:value=move || form.with(|f| f.username.clone())
                            on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        />
                    </label>
                    <label class="social-field">
                        <span>"Order By"</span>
                        <select
                            class="social-select"
                            prop:value=move || form.with(|f| f.order_by.clone())
                            on:change=move |ev| form.update(|f| f.order_by = event_target_value(&ev))
                        >
                            <option value="">"Default"</option>
                            <option value="date">"Newest"</option>
                            <option value="popularity">"Most Popular"</option>
                        </select>
                    </label>
                    <label class="social-field">
                        <span>"Show"</span>
                        <select
                            class="social-select"
                            prop:value=move || form.with(|f| f.show.clone())
                            on:change=move |ev| form.update(|f| f.show = event_target_value(&ev))
                        >
                            <option value="all">"All Posts"</option>
                            {move || {
                                session
                                    .with(|s| s.user().map(|u| u.id))
                                    .map(|id| view! { <option value=id.to_string()>"Your Posts"</option> })
                            }}
                            <option value="up">"Liked Posts"</option>
                            <option value="down">"Disliked Posts"</option>
                        </select>
                    </label>
                    <div class="social-modal-actions">
                        <button type="submit" class="social-btn social-btn-primary">"Apply"</button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
