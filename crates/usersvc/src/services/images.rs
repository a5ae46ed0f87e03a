use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use usersvc_core::blob::BlobStore;
use usersvc_core::image::{
    BlobLayout, ImageResponse, ImageUpload, NextPage, PageCursor, PaginatedImageResponse,
    PaginatedInput, UploadResponse, UserImage,
};
use usersvc_core::service::{Result, ServiceError};
use usersvc_core::storage::{ImageIndexRepository, ImageQuery};

use super::parallel::{run_parallel, SubTask};

/// Keeps the image index and the blob store in step.
///
/// There is no transaction across the two stores: an upload can leave an
/// orphaned blob and a delete can leave one store ahead of the other. Both
/// cases are logged.
pub struct ImageService {
    index: Arc<dyn ImageIndexRepository>,
    blobs: Arc<dyn BlobStore>,
    layout: BlobLayout,
    delete_timeout: Option<Duration>,
}

impl ImageService {
    pub fn new(
        index: Arc<dyn ImageIndexRepository>,
        blobs: Arc<dyn BlobStore>,
        layout: BlobLayout,
    ) -> Self {
        Self {
            index,
            blobs,
            layout,
            delete_timeout: None,
        }
    }

    /// Bounds each delete sub-task.
    pub fn with_delete_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.delete_timeout = timeout;
        self
    }

    /// Writes the blob, then the index row. Returns the new image ID.
    pub async fn save_user_image(
        &self,
        user_id: i64,
        upload: ImageUpload,
    ) -> Result<UploadResponse> {
        if !self.layout.allows(&upload.extension) {
            return Err(ServiceError::BadRequest(format!(
                "File extension not allowed: {}",
                upload.extension
            )));
        }

        let image_id = Uuid::now_v7();
        let path = self.layout.image_path(user_id, image_id, &upload.extension);

        self.blobs.put(&path, &upload.bytes).await?;

        let record = UserImage::new(user_id, image_id, &path, upload.metadata.taken_at, Utc::now());
        if let Err(err) = self.index.put_image(&record).await {
            tracing::warn!(
                user_id,
                %image_id,
                %path,
                error = %err,
                "index write failed, blob left orphaned"
            );
            return Err(ServiceError::Storage(err.to_string()));
        }

        tracing::info!(user_id, %image_id, kind = %upload.metadata.kind, "image saved");
        Ok(UploadResponse { id: image_id })
    }

    /// Point lookup that never touches the blob store.
    pub async fn get_by_user_id_image_id(
        &self,
        user_id: i64,
        image_id: Uuid,
    ) -> Result<ImageResponse> {
        match self.index.get_image(user_id, image_id).await? {
            Some(image) if !image.is_deleted => Ok(ImageResponse::from(&image)),
            _ => Err(ServiceError::NotFound(format!(
                "UserImage not found: {user_id}/{image_id}"
            ))),
        }
    }

    /// One page of the user's live images, newest first.
    pub async fn get_all_user_images(
        &self,
        input: PaginatedInput,
    ) -> Result<PaginatedImageResponse> {
        if let Some(cursor) = &input.cursor {
            self.check_cursor(input.user_id, cursor).await?;
        }

        let query =
            ImageQuery::first_page(input.user_id, input.limit).starting_after(input.cursor);
        let page = self.index.query_images(&query).await?;

        tracing::info!(
            user_id = input.user_id,
            count = page.images.len(),
            has_more = page.last_evaluated.is_some(),
            "images listed"
        );
        Ok(PaginatedImageResponse {
            items: page.images.iter().map(ImageResponse::from).collect(),
            next_page: NextPage::from(page.last_evaluated.as_ref()),
        })
    }

    /// A cursor must point at a row of the same user with the same capture
    /// time. Soft-deleted rows still count, so deleting between pages does
    /// not break a listing.
    async fn check_cursor(&self, user_id: i64, cursor: &PageCursor) -> Result<()> {
        match self.index.get_image(user_id, cursor.last_image_id).await? {
            Some(anchor) if anchor.taken_at == cursor.last_taken_at => Ok(()),
            _ => Err(ServiceError::BadRequest("invalid page cursor".to_string())),
        }
    }

    /// Deletes the blob and soft-deletes the index row concurrently.
    pub async fn delete_by_user_id_image_id(&self, user_id: i64, image_id: Uuid) -> Result<()> {
        // The stored extension is not known without reading the index, so
        // every allowed one is tried.
        let paths = self.layout.candidate_paths(user_id, image_id);
        let blob_task = SubTask::new("blob delete", delete_blobs(Arc::clone(&self.blobs), paths));
        let index_task = SubTask::new(
            "index soft delete",
            soft_delete_one(Arc::clone(&self.index), user_id, image_id),
        );

        run_parallel(vec![blob_task, index_task], self.delete_timeout).await?;
        tracing::info!(user_id, %image_id, "image deleted");
        Ok(())
    }

    /// Deletes every blob under the user's prefix and soft-deletes all of the
    /// user's index rows concurrently. Safe to repeat.
    pub async fn delete_all_by_user_id(&self, user_id: i64) -> Result<()> {
        let prefix = self.layout.user_prefix(user_id);
        let blob_task = SubTask::new(
            "blob delete all",
            delete_blob_prefix(Arc::clone(&self.blobs), prefix),
        );
        let index_task = SubTask::new(
            "index soft delete all",
            soft_delete_all(Arc::clone(&self.index), user_id),
        );

        run_parallel(vec![blob_task, index_task], self.delete_timeout).await?;
        tracing::info!(user_id, "all images deleted");
        Ok(())
    }
}

async fn delete_blobs(blobs: Arc<dyn BlobStore>, paths: Vec<String>) -> Result<()> {
    for path in paths {
        blobs.delete(&path).await?;
    }
    Ok(())
}

async fn delete_blob_prefix(blobs: Arc<dyn BlobStore>, prefix: String) -> Result<()> {
    let removed = blobs.delete_all_with_prefix(&prefix).await?;
    tracing::debug!(%prefix, removed, "blobs removed");
    Ok(())
}

async fn soft_delete_one(
    index: Arc<dyn ImageIndexRepository>,
    user_id: i64,
    image_id: Uuid,
) -> Result<()> {
    index.soft_delete_image(user_id, image_id, Utc::now()).await?;
    Ok(())
}

async fn soft_delete_all(index: Arc<dyn ImageIndexRepository>, user_id: i64) -> Result<()> {
    let changed = index.soft_delete_all(user_id, Utc::now()).await?;
    tracing::debug!(user_id, changed, "index rows soft-deleted");
    Ok(())
}
