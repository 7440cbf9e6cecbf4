//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, TTL
//! expiration and tag/pattern invalidation.
//!
//! Expiry runs on two independent paths. `get` and `has` drop a stale entry
//! when they find one, which bounds staleness for hot keys. `cleanup` sweeps
//! every stale entry, which bounds memory held by keys that are written once
//! and never read again. The store owns no timer; `cleanup` is driven by the
//! host (see `tasks::spawn_cleanup_task`).

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, LruTracker, TtlTier};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cache Store ==
/// Typed in-memory store with TTL expiry, LRU eviction and bulk
/// invalidation.
///
/// Not synchronized; wrap it in [`SharedCache`](crate::cache::SharedCache)
/// to share it between request handlers.
#[derive(Debug)]
pub struct CacheStore<T, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// LRU access index
    lru: LruTracker,
    /// Running counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    clock: C,
}

impl<T> CacheStore<T, SystemClock> {
    // == Constructor ==
    /// Creates a store holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, SystemClock)
    }

    /// Creates a store sized from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity)
    }
}

impl<T, C: Clock> CacheStore<T, C> {
    /// Creates a store that reads time from `clock`.
    pub fn with_clock(capacity: usize, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            clock,
        }
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Absent and expired keys both count as misses; an expired entry is
    /// removed before returning. A hit bumps the entry's access count and
    /// moves it to the most recently used position.
    pub fn get(&mut self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        let now = self.clock.now();

        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired(now) {
            self.expire(key);
            self.stats.record_miss();
            return None;
        }

        let previous = entry.last_accessed;
        entry.record_access(now);
        let value = entry.value.clone();
        self.lru.touch(key, previous, now);
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores `value` under `key` with the default (medium) TTL and no tags.
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        self.set_tagged(key, value, TtlTier::default(), std::iter::empty::<String>());
    }

    /// Stores `value` under `key` with an explicit TTL and no tags.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: T, ttl: impl Into<Duration>) {
        self.set_tagged(key, value, ttl, std::iter::empty::<String>());
    }

    /// Stores `value` under `key` with a TTL and invalidation tags.
    ///
    /// Overwriting an existing key replaces its value, TTL and tags, resets
    /// its access count and never triggers eviction. Inserting a new key
    /// into a full store first evicts the least recently used entry.
    pub fn set_tagged<I, S>(
        &mut self,
        key: impl Into<String>,
        value: T,
        ttl: impl Into<Duration>,
        tags: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        let now = self.clock.now();

        if let Some(existing) = self.entries.get(&key) {
            self.lru.remove(&key, existing.last_accessed);
        } else if self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        let entry = CacheEntry::new(value, ttl.into(), tags, now);
        self.lru.insert(&key, now);
        self.entries.insert(key, entry);
        self.stats.record_set();
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.detach(key).is_some() {
            self.stats.record_deletes(1);
            true
        } else {
            false
        }
    }

    // == Has ==
    /// Checks that `key` holds a fresh entry.
    ///
    /// Does not count as a hit or miss and does not update access tracking,
    /// but an expired entry is still removed.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return false,
        };

        if expired {
            self.expire(key);
            false
        } else {
            true
        }
    }

    // == Invalidation ==
    /// Removes every entry carrying at least one of `tags`.
    pub fn invalidate_by_tags<S: AsRef<str>>(&mut self, tags: &[S]) -> usize {
        let keys = self.keys_matching(|_, entry| entry.has_any_tag(tags));
        let removed = self.remove_all(keys);
        debug!(removed, "invalidated entries by tag");
        removed
    }

    /// Removes every entry whose key matches `pattern`.
    pub fn invalidate_by_pattern(&mut self, pattern: &Regex) -> usize {
        let keys = self.keys_matching(|key, _| pattern.is_match(key));
        let removed = self.remove_all(keys);
        debug!(removed, pattern = %pattern, "invalidated entries by pattern");
        removed
    }

    /// Compiles `pattern` and removes every entry whose key matches it.
    pub fn invalidate_by_pattern_str(&mut self, pattern: &str) -> Result<usize> {
        let pattern = Regex::new(pattern)?;
        Ok(self.invalidate_by_pattern(&pattern))
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.record_deletes(removed);
    }

    // == Cleanup ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now();
        let expired = self.keys_matching(|_, entry| entry.is_expired(now));
        let count = expired.len();

        for key in expired {
            self.detach(&key);
        }

        self.stats.record_expirations(count);
        count
    }

    // == Observability ==
    /// Keys of entries carrying any of `tags`, in lexicographic order.
    ///
    /// Read-only: expired entries that have not been swept yet are listed.
    pub fn get_keys_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        let mut keys = self.keys_matching(|_, entry| entry.has_any_tag(tags));
        keys.sort_unstable();
        keys
    }

    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Borrows the entry stored under `key` without touching statistics,
    /// access tracking or expiry.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// All stored keys in lexicographic order, expired ones included.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Internals ==
    fn keys_matching<F>(&self, mut predicate: F) -> Vec<String>
    where
        F: FnMut(&str, &CacheEntry<T>) -> bool,
    {
        self.entries
            .iter()
            .filter(|(key, entry)| predicate(key.as_str(), entry))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Removes `key` from both the map and the LRU index.
    fn detach(&mut self, key: &str) -> Option<CacheEntry<T>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key, entry.last_accessed);
        Some(entry)
    }

    fn expire(&mut self, key: &str) {
        if self.detach(key).is_some() {
            trace!(key, "dropped expired entry");
            self.stats.record_expirations(1);
        }
    }

    fn remove_all(&mut self, keys: Vec<String>) -> usize {
        let removed = keys
            .iter()
            .filter(|key| self.detach(key).is_some())
            .count();
        self.stats.record_deletes(removed);
        removed
    }

    fn evict_lru(&mut self) {
        if let Some(victim) = self.lru.evict_oldest() {
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, "evicted least recently used entry");
        }
    }
}
