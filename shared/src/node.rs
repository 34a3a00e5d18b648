use crate::images::{wrap_next, wrap_prev};
use crate::tree::{PostNode, VoteTally};
use crate::{Post, VoteResponse, VoteType};

/// Per-card UI state. Seeded from the node, then only ever overwritten with
/// what the server says.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    pub tally: VoteTally,
    pub comment_count: i64,
    pub show_comments: bool,
    pub comment_window_open: bool,
    pub edit_window_open: bool,
    pub image_index: usize,
}

impl NodeState {
    pub fn seed(node: &PostNode) -> Self {
        Self {
            tally: node.tally,
            comment_count: node.comment_count,
            show_comments: false,
            comment_window_open: false,
            edit_window_open: false,
            image_index: 0,
        }
    }

    /// Take the current vote and comment count from a fresh copy of the
    /// post. The displayed counts are left alone.
    pub fn sync(&mut self, fresh: &Post) {
        self.tally.current = fresh.current_user_vote;
        self.comment_count = fresh.comment_count;
    }

    /// Show the server's tally exactly as returned.
    pub fn apply_vote(&mut self, response: VoteResponse) {
        self.tally = VoteTally::from(response);
    }

    pub fn is_highlighted(&self, vote: VoteType) -> bool {
        self.tally.current == Some(vote)
    }

    pub fn toggle_comments(&mut self) {
        self.show_comments = !self.show_comments;
    }

    pub fn toggle_comment_window(&mut self) {
        self.comment_window_open = !self.comment_window_open;
    }

    pub fn toggle_edit_window(&mut self) {
        self.edit_window_open = !self.edit_window_open;
    }

    /// Called once per successfully submitted comment.
    pub fn record_new_comment(&mut self) {
        self.comment_count += 1;
    }

    pub fn next_image(&mut self, len: usize) {
        self.image_index = wrap_next(self.image_index, len);
    }

    pub fn prev_image(&mut self, len: usize) {
        self.image_index = wrap_prev(self.image_index, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;

    fn node() -> PostNode {
        PostNode::from(Post {
            id: 5,
            title: Some("Hello".into()),
            body: "world".into(),
            author: User {
                id: 1,
                name: "ada".into(),
                email: "ada@example.com".into(),
                profile_image: None,
            },
            created_at: "2024-05-01T12:00:00".into(),
            images: Vec::new(),
            upvote_count: 3,
            downvote_count: 1,
            current_user_vote: None,
            comment_count: 2,
            parent_id: None,
            comments: Vec::new(),
        })
    }

    #[test]
    fn seeded_from_node() {
        let state = NodeState::seed(&node());
        assert_eq!(state.tally.upvotes, 3);
        assert_eq!(state.comment_count, 2);
        assert!(!state.show_comments);
    }

    #[test]
    fn vote_response_replaces_tally_verbatim() {
        let mut state = NodeState::seed(&node());
        state.apply_vote(VoteResponse {
            upvote_count: 4,
            downvote_count: 1,
            current_user_vote: Some(VoteType::Up),
        });
        assert!(state.is_highlighted(VoteType::Up));
        assert_eq!((state.tally.upvotes, state.tally.downvotes), (4, 1));

        // The server toggled the vote off; no local arithmetic is applied.
        state.apply_vote(VoteResponse {
            upvote_count: 3,
            downvote_count: 1,
            current_user_vote: None,
        });
        assert!(!state.is_highlighted(VoteType::Up));
        assert_eq!(state.tally.upvotes, 3);
    }

    #[test]
    fn sync_only_touches_vote_and_comment_count() {
        let mut state = NodeState::seed(&node());
        state.show_comments = true;
        let n = node();
        let mut fresh = Post {
            id: n.id,
            title: None,
            body: n.body,
            author: n.author,
            created_at: n.created_at,
            images: Vec::new(),
            upvote_count: 99,
            downvote_count: 99,
            current_user_vote: Some(VoteType::Down),
            comment_count: 7,
            parent_id: None,
            comments: Vec::new(),
        };
        state.sync(&fresh);
        assert_eq!(state.tally.current, Some(VoteType::Down));
        assert_eq!(state.tally.upvotes, 3);
        assert_eq!(state.comment_count, 7);
        assert!(state.show_comments);

        fresh.current_user_vote = None;
        state.sync(&fresh);
        assert_eq!(state.tally.current, None);
    }

    #[test]
    fn counters_and_toggles() {
        let mut state = NodeState::seed(&node());
        state.record_new_comment();
        assert_eq!(state.comment_count, 3);
        state.toggle_comments();
        state.toggle_comment_window();
        assert!(state.show_comments && state.comment_window_open);
        state.prev_image(3);
        assert_eq!(state.image_index, 2);
        state.next_image(3);
        assert_eq!(state.image_index, 0);
    }
}
