use leptos::prelude::*;
use social_shared::{VoteTally, VoteType};

/// Like / dislike buttons with their counts. The tally is whatever the
/// server last reported; nothing is adjusted locally.
#[component]
pub fn VoteBar(
    tally: Signal<VoteTally>,
    enabled: Signal<bool>,
    on_vote: Callback<VoteType>,
) -> impl IntoView {
    let highlighted = move |vote: VoteType| tally.with(|t| t.current == Some(vote));

    view! {
        <div class="social-votes">
            <button
                class="social-vote-btn"
                class:active=move || highlighted(VoteType::Up)
                on:click=move |_| on_vote.run(VoteType::Up)
                disabled=move || !enabled.get()
            >
                "\u{1F44D} "
                {move || tally.with(|t| t.upvotes)}
            </button>
            <button
                class="social-vote-btn"
                class:active=move || highlighted(VoteType::Down)
                on:click=move |_| on_vote.run(VoteType::Down)
                disabled=move || !enabled.get()
            >
                "\u{1F44E} "
                {move || tally.with(|t| t.downvotes)}
            </button>
        </div>
    }
}
