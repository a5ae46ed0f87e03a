use async_trait::async_trait;

use super::Result;

/// Object storage addressed by slash-separated paths.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` at `path`, replacing any existing object.
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Deletes the object at `path`. Deleting an absent object succeeds.
    async fn delete(&self, path: &str) -> Result<()>;

    /// Deletes every object whose path starts with `prefix` and returns how
    /// many were removed. An empty prefix match succeeds with zero.
    async fn delete_all_with_prefix(&self, prefix: &str) -> Result<usize>;
}
