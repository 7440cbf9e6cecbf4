//! Content Cache - An in-process object cache
//!
//! Typed in-memory store with per-entry TTL, LRU eviction under a size
//! bound, tag- and pattern-based invalidation and hit/miss statistics.
//!
//! # Example
//! ```
//! use content_cache::{SharedCache, TtlTier};
//!
//! let cache: SharedCache<String> = SharedCache::new(100);
//! cache.set_tagged("post_1", "Hello".to_string(), TtlTier::Long, ["blog"]);
//! assert_eq!(cache.get("post_1").as_deref(), Some("Hello"));
//!
//! assert_eq!(cache.invalidate_by_tags(&["blog"]), 1);
//! assert_eq!(cache.get("post_1"), None);
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, CacheStore, SharedCache, TtlTier};
pub use clock::{Clock, MockClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
