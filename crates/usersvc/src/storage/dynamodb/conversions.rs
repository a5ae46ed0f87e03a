//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between AttributeValue maps and domain
//! types, testable without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use usersvc_core::image::{format_timestamp, parse_timestamp, UserImage};
use usersvc_core::storage::RepositoryError;

use super::keys::{self, HASH_KEY, INDEX_RANGE_KEY, IS_DELETED, PATH, RANGE_KEY, UPDATED_AT};

/// Convert a UserImage to a DynamoDB item.
pub fn image_to_item(image: &UserImage) -> HashMap<String, AttributeValue> {
    let mut item = keys::image_key(image.user_id, image.image_id);
    item.insert(PATH.to_string(), AttributeValue::S(image.path.clone()));
    item.insert(
        INDEX_RANGE_KEY.to_string(),
        AttributeValue::S(format_timestamp(&image.taken_at)),
    );
    item.insert(
        UPDATED_AT.to_string(),
        AttributeValue::S(format_timestamp(&image.updated_at)),
    );
    item.insert(IS_DELETED.to_string(), AttributeValue::Bool(image.is_deleted));
    item
}

/// Convert a DynamoDB item to a UserImage.
pub fn item_to_image(item: &HashMap<String, AttributeValue>) -> Result<UserImage, RepositoryError> {
    Ok(UserImage {
        user_id: get_user_id(item, HASH_KEY)?,
        image_id: get_uuid(item, RANGE_KEY)?,
        path: get_string(item, PATH)?,
        taken_at: get_datetime(item, INDEX_RANGE_KEY)?,
        updated_at: get_datetime(item, UPDATED_AT)?,
        is_deleted: get_bool(item, IS_DELETED)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

fn invalid(key: &str) -> RepositoryError {
    RepositoryError::InvalidData(format!("Missing or invalid field: {key}"))
}

fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| invalid(key))
}

fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| invalid(key))
}

fn get_user_id(item: &HashMap<String, AttributeValue>, key: &str) -> Result<i64, RepositoryError> {
    let s = get_string(item, key)?;
    s.parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid user ID {key}: {e}")))
}

fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {key}: {e}")))
}

fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    parse_timestamp(&s)
        .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid datetime {key}: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> UserImage {
        UserImage::new(
            17,
            Uuid::parse_str("0190a4b2-7c1e-7d3a-9f00-0000000000ff").unwrap(),
            "images/17/0190a4b2-7c1e-7d3a-9f00-0000000000ff.jpg",
            DateTime::parse_from_rfc3339("2024-01-15T10:30:00.25Z")
                .unwrap()
                .with_timezone(&Utc),
            DateTime::parse_from_rfc3339("2024-01-16T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn test_image_to_item_attributes() {
        let item = image_to_item(&sample_image());

        assert_eq!(item[HASH_KEY], AttributeValue::S("17".to_string()));
        assert_eq!(
            item[INDEX_RANGE_KEY],
            AttributeValue::S("2024-01-15T10:30:00.250000000Z".to_string())
        );
        assert_eq!(item[IS_DELETED], AttributeValue::Bool(false));
    }

    #[test]
    fn test_item_to_image_reads_back() {
        let image = sample_image();
        assert_eq!(item_to_image(&image_to_item(&image)).unwrap(), image);
    }

    #[test]
    fn test_item_to_image_missing_field() {
        let mut item = image_to_item(&sample_image());
        item.remove(PATH);

        let result = item_to_image(&item);
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[test]
    fn test_item_to_image_wrong_type() {
        let mut item = image_to_item(&sample_image());
        item.insert(IS_DELETED.to_string(), AttributeValue::S("false".to_string()));

        assert!(item_to_image(&item).is_err());
    }
}
