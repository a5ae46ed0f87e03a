use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::Delete;
use aws_sdk_s3::Client;

use usersvc_core::blob::{BlobError, BlobStore, Result};

use super::error::{describe, map_s3_error};
use super::paging::{collect_keys, delete_requests};

/// S3-backed blob store. Paths are used as object keys verbatim.
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds a client from shared AWS configuration. A custom endpoint
    /// (LocalStack, MinIO) needs path-style addressing.
    pub fn from_sdk_config(
        sdk_config: &aws_config::SdkConfig,
        bucket: impl Into<String>,
        force_path_style: bool,
    ) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(force_path_style)
            .build();
        Self::new(Client::from_conf(s3_config), bucket)
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        collect_keys(|token| {
            let request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(token);
            async move {
                request
                    .send()
                    .await
                    .map_err(|e| map_s3_error(e, "ListObjectsV2"))
            }
        })
        .await
    }

    async fn delete_batch(&self, delete: Delete) -> Result<()> {
        let output = self
            .client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| map_s3_error(e, "DeleteObjects"))?;

        match output.errors().first() {
            Some(failed) => Err(BlobError::OperationFailed(describe(
                "DeleteObjects",
                failed.code(),
                failed.message(),
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| map_s3_error(e, "PutObject"))?;

        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| map_s3_error(e, "DeleteObject"))?;

        Ok(())
    }

    async fn delete_all_with_prefix(&self, prefix: &str) -> Result<usize> {
        let keys = self.list_keys(prefix).await?;
        for delete in delete_requests(&keys)? {
            self.delete_batch(delete).await?;
        }
        Ok(keys.len())
    }
}
