use chrono::Utc;
use leptos::prelude::*;
use social_shared::time::format_age;
use social_shared::{ComposeVariant, NodeState, PostNode, Session, User, VoteType};
use wasm_bindgen_futures::spawn_local;

use crate::carousel::ImageCarousel;
use crate::compose::ComposeDialog;
use crate::state::AppState;
use crate::votes::VoteBar;

/// Follow one node inside a list that gets replaced wholesale on refresh.
/// Falls back to the copy the card was created with once the node is gone.
fn track_node(source: Signal<Vec<PostNode>>, initial: PostNode) -> Signal<PostNode> {
    let id = initial.id;
    Signal::derive(move || {
        source
            .with(|list| list.iter().find(|n| n.id == id).cloned())
            .unwrap_or_else(|| initial.clone())
    })
}

#[component]
fn Byline(author: User, created_at: String) -> impl IntoView {
    let state = expect_context::<AppState>();
    let avatar = author
        .profile_image
        .as_ref()
        .map(|img| state.config().resolve_url(&img.url));
    let initial = author.name.chars().next().unwrap_or('?').to_uppercase().to_string();
    let age = format_age(&created_at, Utc::now()).unwrap_or_default();

    view! {
        <div class="social-byline">
            {match avatar {
                Some(src) => view! { <img class="social-avatar" src=src alt="" width="28" height="28" /> }.into_any(),
                None => view! { <span class="social-avatar social-avatar-blank">{initial}</span> }.into_any(),
            }}
            <span class="social-username">{author.name.clone()}</span>
            <span class="social-muted">"\u{2022} " {age}</span>
        </div>
    }
}

/// All the root posts, or "No Posts Found".
#[component]
pub fn PostList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let posts = state.posts_signal();
    let source: Signal<Vec<PostNode>> = posts.into();

    view! {
        <div class="social-post-list">
            <For each=move || posts.get() key=|p| p.id let:post>
                <PostCard node=track_node(source, post) />
            </For>
            <Show when=move || posts.with(Vec::is_empty)>
                <p class="social-empty">"No Posts Found"</p>
            </Show>
        </div>
    }
}

/// One node and, when expanded, its replies. Replies render through this
/// same component.
#[component]
pub fn PostCard(node: Signal<PostNode>) -> AnyView {
    let state = expect_context::<AppState>();
    let session = state.session_signal();
    let post_id = node.with_untracked(|n| n.id);
    let ui = RwSignal::new(node.with_untracked(NodeState::seed));

    // The vote highlight and comment count depend on who is looking.
    {
        let client = state.client.clone();
        Effect::new(move |_| {
            session.track();
            let client = client.clone();
            spawn_local(async move {
                if let Ok(fresh) = client.get_post(post_id).await {
                    ui.update(|s| s.sync(&fresh));
                }
            });
        });
    }

    let on_vote = {
        let client = state.client.clone();
        Callback::new(move |vote: VoteType| {
            let client = client.clone();
            spawn_local(async move {
                if let Ok(resp) = client.vote(post_id, vote).await {
                    ui.update(|s| s.apply_vote(resp));
                }
            });
        })
    };

    let image_urls = {
        let config = state.config().clone();
        Signal::derive(move || node.with(|n| n.images.iter().map(|i| config.resolve_url(&i.url)).collect::<Vec<_>>()))
    };
    let replies = Signal::derive(move || node.with(|n| n.comments.clone()));
    let is_own = move || session.with(|s| node.with(|n| n.is_authored_by(s.user())));
    let edit_variant = move || {
        let post = node.get_untracked();
        if post.is_root() {
            ComposeVariant::EditPost { post }
        } else {
            ComposeVariant::EditComment { post }
        }
    };
    let reply_variant = move || ComposeVariant::CreateComment { parent: node.get_untracked() };

    view! {
        <article class="social-card" class:social-card-reply=move || !node.with(PostNode::is_root)>
            {move || node.with(|n| match n.title() {
                Some(title) => view! {
                    <header class="social-card-head">
                        <div>
                            <h3 class="social-card-title">{title.to_string()}</h3>
                            <p class="social-card-body">{n.body.clone()}</p>
                        </div>
                        <Byline author=n.author.clone() created_at=n.created_at.clone() />
                    </header>
                }.into_any(),
                None => view! {
                    <div class="social-card-head">
                        <Byline author=n.author.clone() created_at=n.created_at.clone() />
                        <p class="social-card-body">{n.body.clone()}</p>
                    </div>
                }.into_any(),
            })}

            <Show when=move || image_urls.with(|u| !u.is_empty())>
                <ImageCarousel
                    urls=image_urls
                    index=Signal::derive(move || ui.with(|s| s.image_index))
                    on_prev=Callback::new(move |_| {
                        let len = image_urls.with_untracked(Vec::len);
                        ui.update(|s| s.prev_image(len));
                    })
                    on_next=Callback::new(move |_| {
                        let len = image_urls.with_untracked(Vec::len);
                        ui.update(|s| s.next_image(len));
                    })
                />
            </Show>

            <div class="social-card-actions">
                <VoteBar
                    tally=Signal::derive(move || ui.with(|s| s.tally))
                    enabled=Signal::derive(move || session.with(Session::is_authenticated))
                    on_vote=on_vote
                />
                <button class="social-btn social-btn-text" on:click=move |_| ui.update(NodeState::toggle_comments)>
                    "\u{1F4AC} "
                    {move || ui.with(|s| s.comment_count)}
                </button>
                <Show when=is_own>
                    <button class="social-btn social-btn-text" on:click=move |_| ui.update(NodeState::toggle_edit_window)>
                        "Edit"
                    </button>
                </Show>
            </div>

            <Show when=move || ui.with(|s| s.edit_window_open)>
                <ComposeDialog
                    variant=edit_variant()
                    on_close=Callback::new(move |_| ui.update(|s| s.edit_window_open = false))
                />
            </Show>

            <Show when=move || ui.with(|s| s.show_comments)>
                <hr class="social-divider" />
                <Show when=move || session.with(Session::is_authenticated)>
                    <button class="social-btn social-btn-sm" on:click=move |_| ui.update(NodeState::toggle_comment_window)>
                        {move || format!("Reply to {}", node.with(|n| n.author.name.clone()))}
                    </button>
                </Show>
                <Show when=move || ui.with(|s| s.comment_window_open)>
                    <ComposeDialog
                        variant=reply_variant()
                        on_close=Callback::new(move |_| ui.update(|s| s.comment_window_open = false))
                        on_submitted=Callback::new(move |_| ui.update(NodeState::record_new_comment))
                    />
                </Show>
                <div class="social-replies">
                    <For each=move || replies.get() key=|c| c.id let:child>
                        <PostCard node=track_node(replies, child) />
                    </For>
                </div>
            </Show>
        </article>
    }
    .into_any()
}
