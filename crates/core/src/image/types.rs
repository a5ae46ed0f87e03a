use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ImageError, PageCursor};

/// Page size used when the request gives none, or an unusable one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// An indexed image record. Soft-deleted records stay in the index with
/// `is_deleted` set and are excluded from every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserImage {
    pub user_id: i64,
    pub image_id: Uuid,
    pub path: String,
    pub taken_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl UserImage {
    /// Builds a live record for a freshly stored blob.
    pub fn new(
        user_id: i64,
        image_id: Uuid,
        path: impl Into<String>,
        taken_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            image_id,
            path: path.into(),
            taken_at,
            updated_at,
            is_deleted: false,
        }
    }

    /// Returns a soft-deleted copy stamped with `at`.
    pub fn deleted_at(&self, at: DateTime<Utc>) -> Self {
        Self {
            is_deleted: true,
            updated_at: at,
            ..self.clone()
        }
    }

    /// The position of this record, as a continuation cursor.
    pub fn cursor(&self) -> PageCursor {
        PageCursor::new(self.image_id, self.taken_at)
    }
}

/// The `metadata` part of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub taken_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A decoded upload: the image bytes, its normalized extension and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub extension: String,
    pub metadata: ImageMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: Uuid,
    pub path: String,
    pub taken_at: DateTime<Utc>,
}

impl From<&UserImage> for ImageResponse {
    fn from(image: &UserImage) -> Self {
        Self {
            id: image.image_id,
            path: image.path.clone(),
            taken_at: image.taken_at,
        }
    }
}

/// Continuation parameters for the next page. `params` is empty on the last
/// page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPage {
    pub params: BTreeMap<String, String>,
}

impl From<Option<&PageCursor>> for NextPage {
    fn from(cursor: Option<&PageCursor>) -> Self {
        Self {
            params: cursor.map(PageCursor::to_params).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedImageResponse {
    pub items: Vec<ImageResponse>,
    pub next_page: NextPage,
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedInput {
    pub user_id: i64,
    pub cursor: Option<PageCursor>,
    pub limit: u32,
}

impl PaginatedInput {
    /// Builds the input from raw query values.
    pub fn from_query(
        user_id: i64,
        last_key: Option<&str>,
        last_key_date: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, ImageError> {
        Ok(Self {
            user_id,
            cursor: PageCursor::from_params(last_key, last_key_date)?,
            limit: parse_limit(limit),
        })
    }
}

/// Parses a page size. Absent, unparseable or zero values fall back to
/// [`DEFAULT_PAGE_LIMIT`].
pub fn parse_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(DEFAULT_PAGE_LIMIT)
}

/// Parses an image ID from a path segment.
pub fn parse_image_id(raw: &str) -> Result<Uuid, ImageError> {
    Uuid::parse_str(raw).map_err(|_| ImageError::InvalidImageId(raw.to_string()))
}
