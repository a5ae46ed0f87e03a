use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::image::UserImage;
use crate::user::{NewUser, User};

use super::{ImagePage, ImageQuery, Result};

/// Repository for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user and returns it with its store-assigned ID.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Lists every user, ordered by ID.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Overwrites an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Hard-deletes a user.
    async fn delete_user(&self, id: i64) -> Result<()>;
}

/// Index of image metadata, partitioned by user and sorted by capture time.
#[async_trait]
pub trait ImageIndexRepository: Send + Sync {
    /// Writes an image record, replacing any record with the same key.
    async fn put_image(&self, image: &UserImage) -> Result<()>;

    /// Point lookup by key. Soft-deleted records are returned too; callers
    /// decide whether they count as present.
    async fn get_image(&self, user_id: i64, image_id: Uuid) -> Result<Option<UserImage>>;

    /// Runs a descending, non-deleted-only range query.
    async fn query_images(&self, query: &ImageQuery) -> Result<ImagePage>;

    /// Marks one live record as deleted. Fails with `NotFound` when the record
    /// is absent or already deleted.
    async fn soft_delete_image(
        &self,
        user_id: i64,
        image_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<()>;

    /// Marks every live record of a user as deleted and returns how many were
    /// changed.
    async fn soft_delete_all(&self, user_id: i64, at: DateTime<Utc>) -> Result<usize>;
}
