use crate::{ImageRef, Post, User, VoteResponse, VoteType};

/// Whether a node starts a thread or answers another node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root { title: String },
    Reply { parent_id: i64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
    pub current: Option<VoteType>,
}

impl From<VoteResponse> for VoteTally {
    fn from(r: VoteResponse) -> Self {
        Self {
            upvotes: r.upvote_count,
            downvotes: r.downvote_count,
            current: r.current_user_vote,
        }
    }
}

/// One post or comment in the feed, owning its replies.
#[derive(Debug, Clone, PartialEq)]
pub struct PostNode {
    pub id: i64,
    pub kind: NodeKind,
    pub body: String,
    pub author: User,
    pub created_at: String,
    pub images: Vec<ImageRef>,
    pub tally: VoteTally,
    pub comment_count: i64,
    pub comments: Vec<PostNode>,
}

impl From<Post> for PostNode {
    fn from(post: Post) -> Self {
        // Replies never carry a title, whatever the backend stored.
        let kind = match post.parent_id {
            Some(parent_id) => NodeKind::Reply { parent_id },
            None => NodeKind::Root {
                title: post.title.unwrap_or_default(),
            },
        };
        Self {
            id: post.id,
            kind,
            body: post.body,
            author: post.author,
            created_at: post.created_at,
            images: post.images,
            tally: VoteTally {
                upvotes: post.upvote_count,
                downvotes: post.downvote_count,
                current: post.current_user_vote,
            },
            comment_count: post.comment_count,
            comments: post.comments.into_iter().map(PostNode::from).collect(),
        }
    }
}

impl PostNode {
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Root { title } => Some(title),
            NodeKind::Reply { .. } => None,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root { .. })
    }

    pub fn parent_id(&self) -> Option<i64> {
        match self.kind {
            NodeKind::Reply { parent_id } => Some(parent_id),
            NodeKind::Root { .. } => None,
        }
    }

    pub fn is_authored_by(&self, user: Option<&User>) -> bool {
        user.is_some_and(|u| u.id == self.author.id)
    }

    /// Title the backend stores for a reply to this node.
    pub fn comment_title(&self) -> String {
        match &self.kind {
            NodeKind::Root { title } => format!("Commenting on {} by {}", title, self.author.name),
            NodeKind::Reply { .. } => format!("Replying to {}", self.author.name),
        }
    }

    /// Depth-first search of this subtree.
    pub fn find(&self, id: i64) -> Option<&PostNode> {
        if self.id == id {
            return Some(self);
        }
        self.comments.iter().find_map(|c| c.find(id))
    }
}
