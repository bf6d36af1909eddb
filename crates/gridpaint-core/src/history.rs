//! Bounded undo history.

use std::collections::VecDeque;

/// Number of undo states kept when no capacity is configured.
pub const DEFAULT_UNDO_CAPACITY: usize = 10;

/// Fixed-capacity LIFO history; the oldest entry is evicted on overflow.
///
/// Entries are opaque to the stack.
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}

impl<T> UndoStack<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Push the most recent entry. Returns the evicted entry, if any.
    pub fn push(&mut self, entry: T) -> Option<T> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            log::debug!("Undo history full ({}), evicting oldest entry", self.capacity);
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Remove and return the most recently pushed entry.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut stack = UndoStack::new(10);
        for i in 0..10 {
            assert_eq!(stack.push(i), None);
        }
        assert_eq!(stack.push(10), Some(0));

        assert_eq!(stack.len(), 10);
        let kept: Vec<_> = stack.iter().copied().collect();
        assert_eq!(kept, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut stack = UndoStack::new(3);
        stack.push("a");
        stack.push("b");
        stack.push("c");
        assert_eq!(stack.pop(), Some("c"));
        assert_eq!(stack.pop(), Some("b"));
        assert_eq!(stack.pop(), Some("a"));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut stack = UndoStack::new(0);
        assert_eq!(stack.push(1), Some(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_default_capacity() {
        let stack: UndoStack<u8> = UndoStack::default();
        assert_eq!(stack.capacity(), DEFAULT_UNDO_CAPACITY);
    }
}
