//! Owned list with explicit geometric growth.
//!
//! Window lists and key-code lists start at a fixed capacity and double
//! it exactly when an append makes the length reach the capacity, so the
//! growth schedule is observable and independent of `Vec`'s own policy.

/// Initial capacity of window lists.
pub const WINDOW_LIST_CAPACITY: usize = 100;

/// Initial capacity of key-code lists.
pub const KEY_LIST_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowBuf<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowBuf<T> {
    /// Create an empty list. A zero capacity is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, doubling the capacity if the list is now full.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        if self.items.len() == self.capacity {
            self.capacity *= 2;
            self.items.reserve_exact(self.capacity - self.items.len());
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for GrowBuf<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a GrowBuf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
