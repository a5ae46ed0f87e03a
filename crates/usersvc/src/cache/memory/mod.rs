//! In-memory cache backend with LRU eviction and TTL, for single-instance
//! deployments.

mod cache;

pub use cache::MemoryCache;
