//! Client core for the social feed: wire models, the post tree, stores and
//! the API client. Nothing in here touches the browser; the `interactive`
//! crate injects the transport, token storage and notifier.

pub mod api;
pub mod cell;
pub mod client;
pub mod compose;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod images;
pub mod node;
pub mod notice;
pub mod session;
pub mod time;
pub mod tree;

pub use cell::{SharedCell, StateCell};
pub use client::{ApiClient, ApiRequest, MemoryTokens, Method, RawResponse, RequestBody, TokenStore, Transport};
pub use compose::{ComposeImage, ComposeVariant, ComposeWindow, Submitted};
pub use config::ClientConfig;
pub use error::{ApiError, ComposeError};
pub use feed::{FeedRefresher, PostStore};
pub use filter::{FeedScope, FilterCriteria, FilterForm, OrderBy};
pub use images::{ImageStrip, PendingImage};
pub use node::NodeState;
pub use notice::{Notice, NoticeBoard, NoticeLevel, Notifier};
pub use session::{AccountChanges, Session, SessionStore};
pub use tree::{NodeKind, PostNode, VoteTally};

use serde::{Deserialize, Serialize};

// ── Auth ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<ImageRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
}

// ── Images ──

/// An image stored by the backend. `url` is relative to the API base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub id: i64,
    pub url: String,
}

/// Raw file contents queued for a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// ── Posts ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteType::Up => "up",
            VoteType::Down => "down",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(VoteType::Up),
            "down" => Some(VoteType::Down),
            _ => None,
        }
    }
}

/// A post or comment exactly as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
    pub author: User,
    pub created_at: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub upvote_count: i64,
    #[serde(default)]
    pub downvote_count: i64,
    #[serde(default)]
    pub current_user_vote: Option<VoteType>,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub comments: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: Option<String>,
    pub body: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: String,
}

// ── Votes ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub upvote_count: i64,
    pub downvote_count: i64,
    #[serde(default)]
    pub current_user_vote: Option<VoteType>,
}
