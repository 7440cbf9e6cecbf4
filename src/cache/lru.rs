//! LRU Tracker Module
//!
//! Ordered index of keys by last access time, used to pick eviction victims
//! without scanning every entry.

use std::collections::BTreeSet;
use std::time::Instant;

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Keys are ordered by `(last_accessed, key)`, so the first element is the
/// least recently used entry. Entries sharing a timestamp are evicted in
/// lexicographic key order.
///
/// The tracker does not remember each key's timestamp; callers pass the
/// timestamp currently recorded on the entry.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: BTreeSet<(Instant, String)>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: BTreeSet::new(),
        }
    }

    // == Insert ==
    /// Starts tracking `key` as accessed at `at`.
    pub fn insert(&mut self, key: &str, at: Instant) {
        self.order.insert((at, key.to_string()));
    }

    // == Touch ==
    /// Moves `key` from its previous access time to `to`.
    pub fn touch(&mut self, key: &str, from: Instant, to: Instant) {
        if let Some(mut slot) = self.order.take(&(from, key.to_string())) {
            slot.0 = to;
            self.order.insert(slot);
        } else {
            self.insert(key, to);
        }
    }

    // == Remove ==
    /// Stops tracking `key`. Returns false if it was not tracked at `at`.
    pub fn remove(&mut self, key: &str, at: Instant) -> bool {
        self.order.remove(&(at, key.to_string()))
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first().map(|(_, key)| key.as_str())
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|(_, k)| k == key)
    }

    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(base: Instant, secs: u64) -> Instant {
        base + Duration::from_secs(secs)
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_oldest_by_time() {
        let base = Instant::now();
        let mut lru = LruTracker::new();

        lru.insert("key3", at(base, 3));
        lru.insert("key1", at(base, 1));
        lru.insert("key2", at(base, 2));

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some("key1"));
    }

    #[test]
    fn test_lru_touch_moves_to_back() {
        let base = Instant::now();
        let mut lru = LruTracker::new();

        lru.insert("a", at(base, 1));
        lru.insert("b", at(base, 2));
        lru.insert("c", at(base, 3));

        lru.touch("a", at(base, 1), at(base, 4));

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.evict_oldest(), Some("b".to_string()));
        assert_eq!(lru.evict_oldest(), Some("c".to_string()));
        assert_eq!(lru.evict_oldest(), Some("a".to_string()));
    }

    #[test]
    fn test_lru_ties_broken_by_key_order() {
        let now = Instant::now();
        let mut lru = LruTracker::new();

        lru.insert("zeta", now);
        lru.insert("alpha", now);
        lru.insert("mid", now);

        assert_eq!(lru.evict_oldest(), Some("alpha".to_string()));
        assert_eq!(lru.evict_oldest(), Some("mid".to_string()));
        assert_eq!(lru.evict_oldest(), Some("zeta".to_string()));
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let base = Instant::now();
        let mut lru = LruTracker::new();

        lru.insert("key1", at(base, 1));
        lru.insert("key2", at(base, 2));

        assert!(lru.remove("key2", at(base, 2)));
        assert!(!lru.remove("nonexistent", at(base, 2)));

        assert_eq!(lru.len(), 1);
        assert!(!lru.contains("key2"));
        assert!(lru.contains("key1"));
    }

    #[test]
    fn test_lru_touch_untracked_key_inserts() {
        let base = Instant::now();
        let mut lru = LruTracker::new();

        lru.touch("key1", at(base, 1), at(base, 2));

        assert_eq!(lru.len(), 1);
        assert!(lru.contains("key1"));
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruTracker::new();
        lru.insert("a", Instant::now());
        lru.clear();
        assert!(lru.is_empty());
    }
}
