use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::cell::StateCell;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::filter::FilterCriteria;
use crate::tree::PostNode;

/// Something that can re-fetch the feed. Mutating flows take this rather
/// than the concrete store.
#[async_trait(?Send)]
pub trait FeedRefresher {
    async fn refresh(&self, criteria: FilterCriteria) -> Result<(), ApiError>;

    /// Refresh with the criteria of the last successful refresh.
    async fn reload(&self) -> Result<(), ApiError>;
}

/// Holds the filtered list of root posts. Every refresh replaces the whole
/// list; nothing is merged.
#[derive(Clone)]
pub struct PostStore<C> {
    client: ApiClient,
    posts: C,
    criteria: Arc<RwLock<FilterCriteria>>,
}

impl<C: StateCell<Vec<PostNode>>> PostStore<C> {
    pub fn new(client: ApiClient, posts: C) -> Self {
        Self {
            client,
            posts,
            criteria: Arc::default(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cell(&self) -> &C {
        &self.posts
    }

    pub fn posts(&self) -> Vec<PostNode> {
        self.posts.get()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Initial, unfiltered load.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.refresh(FilterCriteria::default()).await
    }
}

#[async_trait(?Send)]
impl<C: StateCell<Vec<PostNode>>> FeedRefresher for PostStore<C> {
    async fn refresh(&self, criteria: FilterCriteria) -> Result<(), ApiError> {
        // On failure the previous list and criteria both stay.
        let posts = self.client.get_posts(&criteria).await?;
        let roots: Vec<PostNode> = posts.into_iter().map(PostNode::from).collect();
        tracing::debug!(count = roots.len(), filtered = !criteria.is_empty(), "feed refreshed");
        self.posts.set(roots);
        *self.criteria.write().unwrap_or_else(PoisonError::into_inner) = criteria;
        Ok(())
    }

    async fn reload(&self) -> Result<(), ApiError> {
        self.refresh(self.criteria()).await
    }
}
