//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL, tags and
//! access tracking.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value plus the metadata the store uses for expiry, eviction and
/// invalidation.
///
/// Entries are only created by the store's `set` and only mutated by `get`
/// (access bookkeeping). Callers observe them read-only through `peek`.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Insertion (or overwrite) time
    pub stored_at: Instant,
    /// Expiry horizon measured from `stored_at`
    pub ttl: Duration,
    /// Labels for group invalidation
    pub tags: BTreeSet<String>,
    /// Number of successful reads since `stored_at`
    pub access_count: u64,
    /// Time of the last successful read, or `stored_at` if never read
    pub last_accessed: Instant,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a fresh entry stored at `now`.
    pub fn new<I, S>(value: T, ttl: Duration, tags: I, now: Instant) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value,
            stored_at: now,
            ttl,
            tags: tags.into_iter().map(Into::into).collect(),
            access_count: 0,
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry is stale at `now`.
    ///
    /// Boundary condition: an entry whose age equals its TTL is still fresh;
    /// it expires only once the age is strictly greater.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.age(now) > self.ttl
    }

    /// Time elapsed since the entry was stored.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    /// Remaining lifetime, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.ttl.saturating_sub(self.age(now))
    }

    /// Returns true if any of `tags` is attached to this entry.
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag.as_ref()))
    }

    // == Record Access ==
    /// Bumps the access counter and moves `last_accessed` to `now`.
    pub fn record_access(&mut self, now: Instant) {
        self.access_count += 1;
        self.last_accessed = now;
    }
}
