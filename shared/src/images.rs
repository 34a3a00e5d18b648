use crate::error::ComposeError;
use crate::FilePart;

pub const ALLOWED_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/bmp",
];

pub fn is_allowed_type(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// A file the user picked but has not uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub file: FilePart,
    /// Object URL for previewing the file locally.
    pub preview_url: String,
}

/// Check that adding `adding` images to `existing` stays within `max`.
/// With `replace` the existing images do not count.
pub fn check_limit(existing: usize, adding: usize, max: usize, replace: bool) -> Result<(), ComposeError> {
    let total = if replace { adding } else { existing + adding };
    if total > max {
        return Err(ComposeError::ImageLimit(max));
    }
    Ok(())
}

pub fn limit_reached(existing: usize, max: usize) -> bool {
    existing >= max
}

pub fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

pub fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + len - 1) % len
    }
}

/// An ordered list of images with the one currently displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStrip<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> Default for ImageStrip<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
        }
    }
}

impl<T> ImageStrip<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, index: 0 }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// `None` when the index is out of bounds, e.g. on an empty strip.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// Append and jump to the last image.
    pub fn push_many(&mut self, new: Vec<T>) {
        self.items.extend(new);
        self.index = self.items.len().saturating_sub(1);
    }

    pub fn replace_all(&mut self, new: Vec<T>) {
        self.items = new;
        self.index = self.items.len().saturating_sub(1);
    }

    /// Remove the displayed image and step back one, never below zero.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(self.index);
        self.index = self.index.saturating_sub(1);
        Some(removed)
    }

    pub fn next(&mut self) {
        self.index = wrap_next(self.index, self.items.len());
    }

    pub fn prev(&mut self) {
        self.index = wrap_prev(self.index, self.items.len());
    }

    /// "2/4" style position label.
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_clamps_to_previous_index() {
        let mut strip = ImageStrip::new(vec!["a", "b", "c"]);
        strip.next();
        strip.next();
        assert_eq!(strip.current(), Some(&"c"));

        assert_eq!(strip.remove_current(), Some("c"));
        assert_eq!(strip.index(), 1);
        assert_eq!(strip.current(), Some(&"b"));
    }

    #[test]
    fn removing_everything_never_goes_out_of_bounds() {
        let mut strip = ImageStrip::new(vec!["a", "b"]);
        assert_eq!(strip.remove_current(), Some("a"));
        assert_eq!(strip.index(), 0);
        assert_eq!(strip.remove_current(), Some("b"));
        assert_eq!(strip.index(), 0);
        assert!(strip.is_empty());
        assert_eq!(strip.current(), None);
        assert_eq!(strip.remove_current(), None);
        assert_eq!(strip.index(), 0);
    }

    #[test]
    fn navigation_wraps() {
        let mut strip = ImageStrip::new(vec![1, 2, 3]);
        strip.prev();
        assert_eq!(strip.index(), 2);
        strip.next();
        assert_eq!(strip.index(), 0);
        assert_eq!(strip.position_label(), "1/3");

        let mut empty: ImageStrip<i32> = ImageStrip::default();
        empty.next();
        empty.prev();
        assert_eq!(empty.index(), 0);
    }

    #[test]
    fn push_moves_to_last() {
        let mut strip = ImageStrip::new(vec![1]);
        strip.push_many(vec![2, 3]);
        assert_eq!(strip.index(), 2);
        strip.replace_all(vec![9]);
        assert_eq!(strip.items(), &[9]);
        assert_eq!(strip.index(), 0);
    }

    #[test]
    fn limits() {
        assert!(check_limit(3, 1, 4, false).is_ok());
        assert_eq!(check_limit(3, 2, 4, false), Err(ComposeError::ImageLimit(4)));
        assert!(check_limit(1, 1, 1, true).is_ok());
        assert!(limit_reached(4, 4));
        assert!(!limit_reached(3, 4));
        assert!(is_allowed_type("image/webp"));
        assert!(!is_allowed_type("application/pdf"));
    }
}
