use std::sync::{Arc, PoisonError, RwLock};

/// A shared slot of state a store writes into. The browser backs it with a
/// reactive signal; tests and native callers use [`SharedCell`].
///
/// `set` replaces the whole value in one step, so readers never observe a
/// half-written list.
pub trait StateCell<T> {
    fn get(&self) -> T;
    fn set(&self, value: T);

    fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }
}

/// Plain shared state cell.
#[derive(Debug, Default)]
pub struct SharedCell<T>(Arc<RwLock<T>>);

impl<T> SharedCell<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }
}

impl<T> Clone for SharedCell<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Clone> StateCell<T> for SharedCell<T> {
    fn get(&self) -> T {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, value: T) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = SharedCell::new(vec![1, 2]);
        let b = a.clone();
        b.update(|v| v.push(3));
        assert_eq!(a.get(), vec![1, 2, 3]);
    }
}
