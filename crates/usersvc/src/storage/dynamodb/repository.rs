//! DynamoDB repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use uuid::Uuid;

use usersvc_core::image::{format_timestamp, UserImage};
use usersvc_core::storage::{
    ImageIndexRepository, ImagePage, ImageQuery, RepositoryError, Result,
};

use super::conversions::{image_to_item, item_to_image};
use super::error::{map_get_item_error, map_put_item_error, map_query_error, map_update_item_error};
use super::keys::{self, HASH_KEY, IS_DELETED};

/// Concurrent UpdateItem calls issued by `soft_delete_all`.
const SOFT_DELETE_CONCURRENCY: usize = 16;

type Key = HashMap<String, AttributeValue>;

/// DynamoDB-backed image index.
pub struct DynamoDbImageIndex {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoDbImageIndex {
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }

    /// Runs one index query for live rows, newest first.
    async fn query_live(
        &self,
        user_id: i64,
        limit: Option<i32>,
        start: Option<Key>,
    ) -> Result<(Vec<UserImage>, Option<Key>)> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression(format!("{HASH_KEY} = :uid"))
            .filter_expression(format!("{IS_DELETED} = :deleted"))
            .expression_attribute_values(":uid", keys::user_id_value(user_id))
            .expression_attribute_values(":deleted", AttributeValue::Bool(false))
            .scan_index_forward(false)
            .set_limit(limit)
            .set_exclusive_start_key(start)
            .send()
            .await
            .map_err(map_query_error)?;

        let images = result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_image)
            .collect::<Result<Vec<_>>>()?;
        Ok((images, result.last_evaluated_key))
    }
}

#[async_trait]
impl ImageIndexRepository for DynamoDbImageIndex {
    async fn put_image(&self, image: &UserImage) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(image_to_item(image)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_image(&self, user_id: i64, image_id: Uuid) -> Result<Option<UserImage>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::image_key(user_id, image_id)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_image(&item)?)),
            None => Ok(None),
        }
    }

    /// DynamoDB applies `Limit` before the deleted-row filter, so a single
    /// call can come back short while live rows remain. Keep reading until
    /// the page is full or the partition is exhausted.
    async fn query_images(&self, query: &ImageQuery) -> Result<ImagePage> {
        let limit = query.limit.max(1) as usize;
        let mut images: Vec<UserImage> = Vec::with_capacity(limit);
        let mut start = query
            .exclusive_start
            .as_ref()
            .map(|cursor| keys::exclusive_start_key(query.user_id, cursor));

        loop {
            let remaining = i32::try_from(limit - images.len()).unwrap_or(i32::MAX);
            let (batch, last_key) = self.query_live(query.user_id, Some(remaining), start).await?;
            images.extend(batch);

            match last_key {
                None => {
                    return Ok(ImagePage {
                        images,
                        last_evaluated: None,
                    })
                }
                Some(_) if images.len() >= limit => {
                    let last_evaluated = images.last().map(UserImage::cursor);
                    return Ok(ImagePage {
                        images,
                        last_evaluated,
                    });
                }
                Some(key) => start = Some(key),
            }
        }
    }

    async fn soft_delete_image(
        &self,
        user_id: i64,
        image_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::image_key(user_id, image_id)))
            .update_expression(format!(
                "SET {IS_DELETED} = :deleted, {} = :updated",
                keys::UPDATED_AT
            ))
            .condition_expression(format!(
                "attribute_exists({HASH_KEY}) AND {IS_DELETED} = :live"
            ))
            .expression_attribute_values(":deleted", AttributeValue::Bool(true))
            .expression_attribute_values(":live", AttributeValue::Bool(false))
            .expression_attribute_values(":updated", AttributeValue::S(format_timestamp(&at)))
            .send()
            .await
            .map_err(|e| map_update_item_error(e, "UserImage", format!("{user_id}/{image_id}")))?;

        Ok(())
    }

    async fn soft_delete_all(&self, user_id: i64, at: DateTime<Utc>) -> Result<usize> {
        let mut live = Vec::new();
        let mut start = None;
        loop {
            let (batch, last_key) = self.query_live(user_id, None, start).await?;
            live.extend(batch.into_iter().map(|image| image.image_id));
            match last_key {
                Some(key) => start = Some(key),
                None => break,
            }
        }

        let outcomes: Vec<Result<()>> = stream::iter(live)
            .map(|image_id| self.soft_delete_image(user_id, image_id, at))
            .buffer_unordered(SOFT_DELETE_CONCURRENCY)
            .collect()
            .await;

        let mut changed = 0;
        for outcome in outcomes {
            match outcome {
                Ok(()) => changed += 1,
                // Deleted concurrently by another request.
                Err(RepositoryError::NotFound { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(changed)
    }
}
