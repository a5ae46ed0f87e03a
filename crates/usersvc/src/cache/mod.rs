//! Cache backend implementations of `usersvc_core::cache::Cache`.
//!
//! The `redis` feature selects Redis; otherwise an in-process LRU cache is
//! used.

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
