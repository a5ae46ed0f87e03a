use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use usersvc_core::image::{paginate, UserImage};
use usersvc_core::storage::{ImageIndexRepository, ImagePage, ImageQuery, RepositoryError, Result};

/// In-memory image index keyed by `(user_id, image_id)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageIndex {
    rows: Arc<RwLock<HashMap<(i64, Uuid), UserImage>>>,
}

impl InMemoryImageIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageIndexRepository for InMemoryImageIndex {
    async fn put_image(&self, image: &UserImage) -> Result<()> {
        let mut rows = self.rows.write().await;
        rows.insert((image.user_id, image.image_id), image.clone());
        Ok(())
    }

    async fn get_image(&self, user_id: i64, image_id: Uuid) -> Result<Option<UserImage>> {
        Ok(self.rows.read().await.get(&(user_id, image_id)).cloned())
    }

    async fn query_images(&self, query: &ImageQuery) -> Result<ImagePage> {
        let rows = self.rows.read().await;
        Ok(paginate(rows.values(), query))
    }

    async fn soft_delete_image(
        &self,
        user_id: i64,
        image_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&(user_id, image_id)) {
            Some(row) if !row.is_deleted => {
                *row = row.deleted_at(at);
                Ok(())
            }
            _ => Err(RepositoryError::NotFound {
                entity_type: "UserImage",
                id: format!("{user_id}/{image_id}"),
            }),
        }
    }

    async fn soft_delete_all(&self, user_id: i64, at: DateTime<Utc>) -> Result<usize> {
        let mut rows = self.rows.write().await;
        let mut changed = 0;
        for row in rows
            .values_mut()
            .filter(|row| row.user_id == user_id && !row.is_deleted)
        {
            *row = row.deleted_at(at);
            changed += 1;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn image(user_id: i64, minutes: i64) -> UserImage {
        let id = Uuid::now_v7();
        UserImage::new(user_id, id, format!("images/{user_id}/{id}.jpg"), at(minutes), at(0))
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let index = InMemoryImageIndex::new();
        let img = image(1, 5);
        index.put_image(&img).await.unwrap();

        assert_eq!(index.get_image(1, img.image_id).await.unwrap(), Some(img.clone()));
        assert!(index.get_image(2, img.image_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_query_but_not_get() {
        let index = InMemoryImageIndex::new();
        let img = image(1, 5);
        index.put_image(&img).await.unwrap();

        index.soft_delete_image(1, img.image_id, at(60)).await.unwrap();

        let page = index.query_images(&ImageQuery::first_page(1, 10)).await.unwrap();
        assert!(page.images.is_empty());

        let stored = index.get_image(1, img.image_id).await.unwrap().unwrap();
        assert!(stored.is_deleted);
        assert_eq!(stored.updated_at, at(60));
    }

    #[tokio::test]
    async fn test_soft_delete_twice_is_not_found() {
        let index = InMemoryImageIndex::new();
        let img = image(1, 5);
        index.put_image(&img).await.unwrap();
        index.soft_delete_image(1, img.image_id, at(60)).await.unwrap();

        let again = index.soft_delete_image(1, img.image_id, at(61)).await;
        assert!(matches!(again, Err(RepositoryError::NotFound { .. })));

        let missing = index.soft_delete_image(1, Uuid::now_v7(), at(61)).await;
        assert!(matches!(missing, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_soft_delete_all_counts_live_rows_of_user() {
        let index = InMemoryImageIndex::new();
        for minutes in 0..3 {
            index.put_image(&image(1, minutes)).await.unwrap();
        }
        index.put_image(&image(2, 0)).await.unwrap();

        assert_eq!(index.soft_delete_all(1, at(90)).await.unwrap(), 3);
        assert_eq!(index.soft_delete_all(1, at(91)).await.unwrap(), 0);

        let other = index.query_images(&ImageQuery::first_page(2, 10)).await.unwrap();
        assert_eq!(other.images.len(), 1);
    }
}
