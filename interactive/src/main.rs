mod account;
mod api;
mod auth;
mod carousel;
mod compose;
mod feed;
mod logging;
mod notices;
mod posts;
mod state;
mod votes;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();

    let config = api::load_config();
    logging::init(&config.log_level);
    tracing::info!(api = %config.api_base, "starting social feed");

    let document = web_sys::window()
        .expect("no window")
        .document()
        .expect("no document");

    // Mount into the host page's slot if it has one, otherwise take the body.
    match document.get_element_by_id("social-app") {
        Some(el) => {
            let html_el: web_sys::HtmlElement = el.unchecked_into();
            leptos::mount::mount_to(html_el, move || {
                view! {
                    <state::AppProvider config=config>
                        <feed::FeedApp />
                    </state::AppProvider>
                }
            })
            .forget();
        }
        None => leptos::mount::mount_to_body(move || {
            view! {
                <state::AppProvider config=config>
                    <feed::FeedApp />
                </state::AppProvider>
            }
        }),
    }
}
