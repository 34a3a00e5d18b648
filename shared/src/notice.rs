/// Key shared by every transport failure, so repeated failures show once.
pub const API_ERROR_KEY: &str = "api-error";
pub const WELCOME_KEY: &str = "welcome";
pub const IMAGE_LIMIT_KEY: &str = "image-limit";
pub const COMPOSE_KEY: &str = "compose";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub key: String,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(key: impl Into<String>, level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            level,
            message: message.into(),
        }
    }

    pub fn error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(key, NoticeLevel::Error, message)
    }

    pub fn success(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(key, NoticeLevel::Success, message)
    }

    pub fn info(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(key, NoticeLevel::Info, message)
    }
}

/// Sink for notices. The browser renders them as toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// The notices currently on screen.
///
/// A notice whose key is already displayed is dropped, matching how
/// keyed toasts behave: one visible notice per key until it is dismissed.
/// Each shown notice gets a ticket so a timer can take down exactly the
/// notice it was started for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeBoard {
    shown: Vec<(u64, Notice)>,
    next_ticket: u64,
}

impl NoticeBoard {
    /// Returns the notice's ticket, or `None` when a notice with the same
    /// key is already shown.
    pub fn push(&mut self, notice: Notice) -> Option<u64> {
        if self.shown.iter().any(|(_, n)| n.key == notice.key) {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.shown.push((ticket, notice));
        Some(ticket)
    }

    pub fn dismiss(&mut self, key: &str) {
        self.shown.retain(|(_, n)| n.key != key);
    }

    /// Take down the notice holding `ticket`. A no-op once it is gone,
    /// even if a newer notice reuses its key.
    pub fn expire(&mut self, ticket: u64) {
        self.shown.retain(|(t, _)| *t != ticket);
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.shown.iter().map(|(_, n)| n)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_coalesces_until_dismissed() {
        let mut board = NoticeBoard::default();
        assert!(board.push(Notice::error(API_ERROR_KEY, "Not Found")).is_some());
        assert!(board.push(Notice::error(API_ERROR_KEY, "Internal Server Error")).is_none());
        assert_eq!(board.len(), 1);
        assert_eq!(board.notices().next().unwrap().message, "Not Found");

        assert!(board.push(Notice::success(WELCOME_KEY, "Welcome, Ada")).is_some());
        assert_eq!(board.len(), 2);

        board.dismiss(API_ERROR_KEY);
        assert!(board.push(Notice::error(API_ERROR_KEY, "Internal Server Error")).is_some());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn stale_timer_leaves_a_newer_notice_with_the_same_key() {
        let mut board = NoticeBoard::default();
        let first = board.push(Notice::error(API_ERROR_KEY, "Not Found")).unwrap();
        board.dismiss(API_ERROR_KEY);
        let second = board.push(Notice::error(API_ERROR_KEY, "Internal Server Error")).unwrap();
        assert_ne!(first, second);

        board.expire(first);
        assert_eq!(board.len(), 1);
        assert_eq!(board.notices().next().unwrap().message, "Internal Server Error");

        board.expire(second);
        assert!(board.is_empty());
    }
}
