//! Application state shared by every handler.
//!
//! Each store concern picks its backend from a cargo feature: `sqlite` for
//! users, `dynamodb` for the image index, `s3` for blobs and `redis` for the
//! cache. A concern without its feature uses the in-memory backend.

use std::{sync::Arc, time::Duration};

use usersvc_core::blob::BlobStore;
use usersvc_core::cache::Cache;
use usersvc_core::image::BlobLayout;
use usersvc_core::storage::{ImageIndexRepository, UserRepository};

use crate::config::Config;
use crate::services::{ImageService, UserService};
use crate::upload::UploadParser;

/// Shared application state.
///
/// Cloned for each request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub images: Arc<ImageService>,
    /// Cache for `GET /users/{id}`, filled by the user handlers.
    pub cache: Arc<dyn Cache>,
    pub cache_ttl: Duration,
    pub upload_parser: Arc<UploadParser>,
}

impl AppState {
    fn build(
        user_repo: Arc<dyn UserRepository>,
        image_index: Arc<dyn ImageIndexRepository>,
        blobs: Arc<dyn BlobStore>,
        cache: Arc<dyn Cache>,
        config: &Config,
    ) -> Self {
        // One allow-list, shared by the parser and the service.
        let layout = BlobLayout::new(&config.blob_directory, &config.allowed_extensions);

        let images = ImageService::new(image_index, blobs, layout.clone())
            .with_delete_timeout(config.delete_timeout());

        Self {
            users: Arc::new(UserService::new(user_repo)),
            images: Arc::new(images),
            cache,
            cache_ttl: config.cache_ttl(),
            upload_parser: Arc::new(UploadParser::new(layout, config.max_upload_bytes)),
        }
    }

    /// Connects every backend selected at compile time.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let user_repo = user_repository(config).await?;
        let image_index = image_index(config).await;
        let blobs = blob_store(config).await;
        let cache = cache(config).await?;

        Ok(Self::build(user_repo, image_index, blobs, cache, config))
    }
}

#[cfg(test)]
impl AppState {
    /// All in-memory backends wired with `config`.
    pub fn in_memory(config: &Config) -> Self {
        use crate::blob::MemoryBlobStore;
        use crate::cache::MemoryCache;
        use crate::storage::inmemory::{InMemoryImageIndex, InMemoryUserRepository};

        Self::build(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryImageIndex::new()),
            Arc::new(MemoryBlobStore::new()),
            Arc::new(MemoryCache::new(config.cache_max_entries)),
            config,
        )
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(&Config::from_env())
    }
}

// ============================================================================
// Backend factories
// ============================================================================

#[cfg(feature = "sqlite")]
async fn user_repository(config: &Config) -> Result<Arc<dyn UserRepository>, anyhow::Error> {
    use crate::storage::sqlite::SqliteUserRepository;

    tracing::info!(path = %config.sqlite_path, "using SQLite user store");
    Ok(Arc::new(SqliteUserRepository::new(&config.sqlite_path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn user_repository(_config: &Config) -> Result<Arc<dyn UserRepository>, anyhow::Error> {
    tracing::info!("using in-memory user store");
    Ok(Arc::new(crate::storage::inmemory::InMemoryUserRepository::new()))
}

#[cfg(feature = "dynamodb")]
async fn image_index(config: &Config) -> Arc<dyn ImageIndexRepository> {
    use crate::storage::dynamodb::DynamoDbImageIndex;

    let sdk_config = aws_config(config).await;
    tracing::info!(
        table = %config.dynamodb_table,
        index = %config.dynamodb_index,
        "using DynamoDB image index"
    );
    Arc::new(DynamoDbImageIndex::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        &config.dynamodb_table,
        &config.dynamodb_index,
    ))
}

#[cfg(not(feature = "dynamodb"))]
async fn image_index(_config: &Config) -> Arc<dyn ImageIndexRepository> {
    tracing::info!("using in-memory image index");
    Arc::new(crate::storage::inmemory::InMemoryImageIndex::new())
}

#[cfg(feature = "s3")]
async fn blob_store(config: &Config) -> Arc<dyn BlobStore> {
    use crate::blob::s3::S3BlobStore;

    let sdk_config = aws_config(config).await;
    tracing::info!(bucket = %config.s3_bucket, "using S3 blob store");
    Arc::new(S3BlobStore::from_sdk_config(
        &sdk_config,
        &config.s3_bucket,
        config.aws_endpoint_url.is_some(),
    ))
}

#[cfg(not(feature = "s3"))]
async fn blob_store(_config: &Config) -> Arc<dyn BlobStore> {
    tracing::info!("using in-memory blob store");
    Arc::new(crate::blob::MemoryBlobStore::new())
}

#[cfg(feature = "redis")]
async fn cache(config: &Config) -> Result<Arc<dyn Cache>, anyhow::Error> {
    use crate::cache::RedisCache;

    tracing::info!(url = %config.redis_url, "using Redis cache");
    Ok(Arc::new(RedisCache::new(&config.redis_url).await?))
}

#[cfg(not(feature = "redis"))]
async fn cache(config: &Config) -> Result<Arc<dyn Cache>, anyhow::Error> {
    use crate::cache::MemoryCache;

    tracing::info!(max_entries = config.cache_max_entries, "using in-memory cache");
    Ok(Arc::new(MemoryCache::new(config.cache_max_entries)))
}

/// Shared AWS configuration. `AWS_ENDPOINT_URL` points both clients at
/// LocalStack or another compatible endpoint.
#[cfg(any(feature = "dynamodb", feature = "s3"))]
async fn aws_config(config: &Config) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(endpoint) = &config.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}
