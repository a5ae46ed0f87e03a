use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use usersvc_core::blob::{BlobStore, Result};

/// In-memory blob store keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes stored at `path`.
    #[cfg(test)]
    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(path).cloned()
    }

    /// Returns every stored path in order.
    #[cfg(test)]
    pub async fn paths(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let mut objects = self.objects.write().await;
        objects.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.objects.write().await.remove(path);
        Ok(())
    }

    async fn delete_all_with_prefix(&self, prefix: &str) -> Result<usize> {
        let mut objects = self.objects.write().await;
        let before = objects.len();
        objects.retain(|path, _| !path.starts_with(prefix));
        Ok(before - objects.len())
    }
}
