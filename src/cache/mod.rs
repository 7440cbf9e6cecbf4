//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, LRU eviction and
//! tag/pattern invalidation.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl::TtlTier;
