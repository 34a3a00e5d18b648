use std::time::Duration;

use leptos::prelude::*;
use social_shared::{Notice, NoticeBoard, Notifier};

/// Pushes notices onto the on-screen board and takes each one down after
/// the configured delay.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    board: RwSignal<NoticeBoard>,
    ttl: Duration,
}

impl ToastNotifier {
    pub fn new(board: RwSignal<NoticeBoard>, ttl_ms: u32) -> Self {
        Self {
            board,
            ttl: Duration::from_millis(u64::from(ttl_ms)),
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let mut ticket = None;
        self.board.update(|b| ticket = b.push(notice));
        if let Some(ticket) = ticket {
            let board = self.board;
            set_timeout(move || board.update(|b| b.expire(ticket)), self.ttl);
        }
    }
}

#[component]
pub fn Toasts(board: RwSignal<NoticeBoard>) -> impl IntoView {
    view! {
        <div class="social-toasts">
            <For
                each=move || board.with(|b| b.notices().cloned().collect::<Vec<_>>())
                key=|n| n.key.clone()
                let:notice
            >
                {
                    let key = notice.key.clone();
                    view! {
                        <div
                            class=format!("social-toast social-toast-{}", notice.level.as_str())
                            on:click=move |_| board.update(|b| b.dismiss(&key))
                        >
                            {notice.message.clone()}
                        </div>
                    }
                }
            </For>
        </div>
    }
}
