use crate::cell::StateCell;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::feed::FeedRefresher;
use crate::notice::{Notice, WELCOME_KEY};
use crate::{FilePart, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

/// New values from the account window.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountChanges {
    pub name: String,
    pub email: String,
    /// Replaces the current profile image when set.
    pub profile_image: Option<FilePart>,
}

/// Owns who is logged in.
#[derive(Clone)]
pub struct SessionStore<C> {
    client: ApiClient,
    session: C,
}

impl<C: StateCell<Session>> SessionStore<C> {
    pub fn new(client: ApiClient, session: C) -> Self {
        Self { client, session }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cell(&self) -> &C {
        &self.session
    }

    pub fn current(&self) -> Session {
        self.session.get()
    }

    pub fn user(&self) -> Option<User> {
        self.current().user().cloned()
    }

    /// Re-read the identity behind the stored token. Without a token this
    /// settles to anonymous without touching the network. A rejected token
    /// is forgotten.
    pub async fn refresh(&self) -> Session {
        if !self.client.has_token() {
            self.settle(Session::Anonymous);
            return Session::Anonymous;
        }
        self.authenticate().await.unwrap_or_default()
    }

    /// Fetch the user behind the current token and settle on the result.
    async fn authenticate(&self) -> Result<Session, ApiError> {
        match self.client.get_current_user().await {
            Ok(user) => {
                let next = Session::Authenticated(user);
                self.settle(next.clone());
                Ok(next)
            }
            Err(err) => {
                if err.is_unauthorized() {
                    tracing::info!("stored token rejected, dropping it");
                    self.client.tokens().clear();
                }
                self.settle(Session::Anonymous);
                Err(err)
            }
        }
    }

    /// Forget the identity without a network call. The token is kept.
    pub fn clear(&self) {
        self.settle(Session::Anonymous);
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.client.login(email, password).await?;
        // A login only counts once the identity behind the token is known.
        self.authenticate().await
    }

    /// Create the account, then log straight into it.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session, ApiError> {
        let user = self.client.create_user(name, email, password).await?;
        tracing::info!(user_id = user.id, "account created");
        self.login(email, password).await
    }

    pub fn logout(&self) {
        self.client.logout();
        self.clear();
    }

    /// Save profile edits. The confirm password is checked by logging in
    /// again with the email the session currently has.
    pub async fn update_account(
        &self,
        changes: AccountChanges,
        password: &str,
        feed: &dyn FeedRefresher,
    ) -> Result<Session, ApiError> {
        let user = self.user().ok_or(ApiError::NotLoggedIn)?;

        self.client.login(&user.email, password).await?;
        self.client.update_user(&changes.name, &changes.email).await?;

        if let Some(image) = changes.profile_image {
            if user.profile_image.is_some() {
                self.client.delete_profile_image().await?;
            }
            self.client.create_profile_image(image).await?;
        }

        let session = self.refresh().await;
        // Author names and avatars are embedded in posts.
        if let Err(err) = feed.reload().await {
            tracing::warn!("feed reload after account update failed: {}", err);
        }
        Ok(session)
    }

    fn settle(&self, next: Session) {
        let previous = self.session.get();
        if let Session::Authenticated(user) = &next {
            let newly_seen = previous.user().map(|u| u.id) != Some(user.id);
            if newly_seen && !user.name.is_empty() {
                self.client
                    .notifier()
                    .notify(Notice::success(WELCOME_KEY, format!("Welcome, {}", user.name)));
            }
        }
        if previous != next {
            tracing::debug!(authenticated = next.is_authenticated(), "session changed");
            self.session.set(next);
        }
    }
}
