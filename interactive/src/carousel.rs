use leptos::prelude::*;

/// One image at a time with wrap-around arrows. Shows nothing when `index`
/// is out of range.
#[component]
pub fn ImageCarousel(
    urls: Signal<Vec<String>>,
    index: Signal<usize>,
    on_prev: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    let current = move || urls.with(|u| u.get(index.get()).cloned());
    let label = move || format!("{}/{}", index.get() + 1, urls.with(Vec::len));

    view! {
        <div class="social-carousel">
            {move || current().map(|src| view! { <img class="social-carousel-img" src=src alt=label() /> })}
            <Show when=move || urls.with(|u| u.len() > 1)>
                <div class="social-carousel-nav">
                    <button type="button" class="social-btn social-btn-sm" on:click=move |_| on_prev.run(())>
                        "\u{2190}"
                    </button>
                    <span class="social-carousel-pos">{label}</span>
                    <button type="button" class="social-btn social-btn-sm" on:click=move |_| on_next.run(())>
                        "\u{2192}"
                    </button>
                </div>
            </Show>
        </div>
    }
}
