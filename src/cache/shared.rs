//! Shared Cache Module
//!
//! Thread-safe handle around a `CacheStore`, built once at the composition
//! root and cloned into whichever components need the cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use regex::Regex;

use crate::cache::{CacheStats, CacheStore};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle to one shared [`CacheStore`].
///
/// A single mutex guards the entries and the statistics, so every
/// operation, including eviction plus insertion inside `set`, is atomic with
/// respect to every other. No operation holds the lock across an `.await`
/// or a value producer.
#[derive(Debug)]
pub struct SharedCache<T, C = SystemClock> {
    inner: Arc<Mutex<CacheStore<T, C>>>,
}

impl<T, C> Clone for SharedCache<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedCache<T, SystemClock> {
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::from_store(CacheStore::new(capacity))
    }

    /// Creates a shared cache sized from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::from_store(CacheStore::from_config(config))
    }
}

impl<T, C: Clock> SharedCache<T, C> {
    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<T, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Creates a shared cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, clock: C) -> Self {
        Self::from_store(CacheStore::with_clock(capacity, clock))
    }

    pub fn get(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().get(key)
    }

    pub fn set(&self, key: impl Into<String>, value: T) {
        self.inner.lock().set(key, value);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, value: T, ttl: impl Into<Duration>) {
        self.inner.lock().set_with_ttl(key, value, ttl);
    }

    pub fn set_tagged<I, S>(
        &self,
        key: impl Into<String>,
        value: T,
        ttl: impl Into<Duration>,
        tags: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.lock().set_tagged(key, value, ttl, tags);
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.inner.lock().has(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn invalidate_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> usize {
        self.inner.lock().invalidate_by_tags(tags)
    }

    pub fn invalidate_by_pattern(&self, pattern: &Regex) -> usize {
        self.inner.lock().invalidate_by_pattern(pattern)
    }

    pub fn invalidate_by_pattern_str(&self, pattern: &str) -> Result<usize> {
        // Compile before locking
        let pattern = Regex::new(pattern)?;
        Ok(self.invalidate_by_pattern(&pattern))
    }

    /// Sweeps expired entries. Intended for a periodic trigger.
    pub fn cleanup(&self) -> usize {
        self.inner.lock().cleanup()
    }

    pub fn get_keys_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        self.inner.lock().get_keys_by_tags(tags)
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` with exclusive access to the underlying store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut CacheStore<T, C>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    // == Read-through ==
    /// Returns the cached value for `key`, or computes it with `producer`
    /// and caches it.
    ///
    /// The producer runs without the lock held, so concurrent misses on the
    /// same key may each run it; the last write wins.
    pub fn get_or_insert_with<I, S, F>(
        &self,
        key: &str,
        ttl: impl Into<Duration>,
        tags: I,
        producer: F,
    ) -> T
    where
        T: Clone,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = producer();
        self.set_tagged(key, value.clone(), ttl, tags);
        value
    }

    /// Async read-through over a fallible backend call.
    ///
    /// On a miss `fetch` is awaited; a successful value is cached and
    /// returned, an error is returned as-is and nothing is cached.
    pub async fn get_or_try_fetch<I, S, F, Fut, E>(
        &self,
        key: &str,
        ttl: impl Into<Duration>,
        tags: I,
        fetch: F,
    ) -> std::result::Result<T, E>
    where
        T: Clone,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = fetch().await?;
        self.set_tagged(key, value.clone(), ttl, tags);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlTier;
    use crate::clock::MockClock;
    use std::thread;

    const NO_TAGS: [&str; 0] = [];

    #[test]
    fn test_clones_share_store() {
        let cache: SharedCache<String> = SharedCache::new(10);
        let handle = cache.clone();

        handle.set("key", "value".to_string());

        assert_eq!(cache.get("key"), Some("value".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_or_insert_with_caches_value() {
        let cache: SharedCache<u32> = SharedCache::new(10);
        let mut calls = 0;

        let first = cache.get_or_insert_with("answer", TtlTier::Short, ["math"], || {
            calls += 1;
            42
        });
        let second = cache.get_or_insert_with("answer", TtlTier::Short, ["math"], || {
            calls += 1;
            0
        });

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls, 1);
        assert_eq!(cache.get_keys_by_tags(&["math"]), vec!["answer"]);
    }

    #[test]
    fn test_get_or_insert_with_refetches_after_expiry() {
        let clock = MockClock::new();
        let cache: SharedCache<u32, MockClock> = SharedCache::with_clock(10, clock.clone());

        cache.get_or_insert_with("k", Duration::from_secs(1), NO_TAGS, || 1);
        clock.advance(Duration::from_secs(2));
        let value = cache.get_or_insert_with("k", Duration::from_secs(1), NO_TAGS, || 2);

        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn test_get_or_try_fetch_error_not_cached() {
        let cache: SharedCache<u32> = SharedCache::new(10);

        let result: std::result::Result<u32, &str> = cache
            .get_or_try_fetch("k", TtlTier::Medium, NO_TAGS, || async { Err("backend down") })
            .await;
        assert_eq!(result, Err("backend down"));
        assert!(!cache.has("k"));

        let result: std::result::Result<u32, &str> = cache
            .get_or_try_fetch("k", TtlTier::Medium, NO_TAGS, || async { Ok(7) })
            .await;
        assert_eq!(result, Ok(7));
        assert_eq!(cache.get("k"), Some(7));
    }

    #[test]
    fn test_concurrent_sets_respect_capacity() {
        let cache: SharedCache<usize> = SharedCache::new(16);

        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.set(format!("w{worker}_k{i}"), i);
                        cache.get(&format!("w{worker}_k{i}"));
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.size, 16);
        assert_eq!(stats.sets, 800);
        assert_eq!(stats.hits + stats.misses, 800);
        assert_eq!(stats.evictions, 800 - 16);
    }

    #[test]
    fn test_with_store_exposes_peek() {
        let cache: SharedCache<u32> = SharedCache::new(10);
        cache.set("k", 1);
        cache.get("k");

        let count = cache.with_store(|store| store.peek("k").map(|e| e.access_count));
        assert_eq!(count, Some(1));
    }
}
