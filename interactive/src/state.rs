use std::sync::Arc;

use leptos::prelude::*;
use social_shared::{
    ApiClient, ClientConfig, NoticeBoard, PostNode, PostStore, Session, SessionStore, StateCell,
};
use wasm_bindgen_futures::spawn_local;

use crate::api::{BrowserTransport, LocalStorageTokens};
use crate::notices::ToastNotifier;

/// Store cell backed by a Leptos signal, so writes from the shared stores
/// re-render whatever reads them.
pub struct SignalCell<T: Send + Sync + 'static>(RwSignal<T>);

impl<T: Send + Sync + 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for SignalCell<T> {}

impl<T: Send + Sync + 'static> SignalCell<T> {
    pub fn new(value: T) -> Self {
        Self(RwSignal::new(value))
    }

    pub fn signal(&self) -> RwSignal<T> {
        self.0
    }
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn get(&self) -> T {
        self.0.get_untracked()
    }

    fn set(&self, value: T) {
        self.0.set(value);
    }
}

pub type Feed = PostStore<SignalCell<Vec<PostNode>>>;
pub type Sessions = SessionStore<SignalCell<Session>>;

/// Everything the components share, handed out via context.
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub session: Sessions,
    pub feed: Feed,
    pub notices: RwSignal<NoticeBoard>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        let notices = RwSignal::new(NoticeBoard::default());
        let notifier = ToastNotifier::new(notices, config.notice_ttl_ms);
        let tokens = LocalStorageTokens::new(&config.token_key);
        let client = ApiClient::new(
            config,
            Arc::new(BrowserTransport),
            Arc::new(tokens),
            Arc::new(notifier),
        );
        Self {
            session: SessionStore::new(client.clone(), SignalCell::new(Session::Anonymous)),
            feed: PostStore::new(client.clone(), SignalCell::new(Vec::new())),
            client,
            notices,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    pub fn session_signal(&self) -> RwSignal<Session> {
        self.session.cell().signal()
    }

    pub fn posts_signal(&self) -> RwSignal<Vec<PostNode>> {
        self.feed.cell().signal()
    }
}

/// Provider component: builds the client and stores, kicks off the first
/// session check and feed load, then renders children.
#[component]
pub fn AppProvider(config: ClientConfig, children: Children) -> impl IntoView {
    let state = AppState::new(config);
    provide_context(state.clone());

    {
        let session = state.session.clone();
        spawn_local(async move {
            session.refresh().await;
        });
    }
    {
        let feed = state.feed.clone();
        spawn_local(async move {
            if let Err(err) = feed.load().await {
                tracing::debug!(error = %err, "initial feed load failed");
            }
        });
    }

    children()
}
