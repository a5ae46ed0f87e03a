//! DynamoDB attribute names and key builders.
//!
//! Pure functions, no I/O.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use uuid::Uuid;

use usersvc_core::image::{format_timestamp, PageCursor};

// ============================================================================
// Attribute names
// ============================================================================

pub const HASH_KEY: &str = "UserID";
pub const RANGE_KEY: &str = "ImageID";
pub const INDEX_RANGE_KEY: &str = "TakenAt";
pub const PATH: &str = "Path";
pub const UPDATED_AT: &str = "UpdatedAt";
pub const IS_DELETED: &str = "IsDeleted";

/// User IDs are stored as strings, the way the table was first populated.
pub fn user_id_value(user_id: i64) -> AttributeValue {
    AttributeValue::S(user_id.to_string())
}

/// Primary key of one image row.
pub fn image_key(user_id: i64, image_id: Uuid) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (HASH_KEY.to_string(), user_id_value(user_id)),
        (RANGE_KEY.to_string(), AttributeValue::S(image_id.to_string())),
    ])
}

/// Exclusive start key for a query on the `TakenAt` index.
///
/// Index queries need the table key plus the index range key.
pub fn exclusive_start_key(user_id: i64, cursor: &PageCursor) -> HashMap<String, AttributeValue> {
    let mut key = image_key(user_id, cursor.last_image_id);
    key.insert(
        INDEX_RANGE_KEY.to_string(),
        AttributeValue::S(format_timestamp(&cursor.last_taken_at)),
    );
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_image_key() {
        let key = image_key(42, Uuid::nil());
        assert_eq!(key.len(), 2);
        assert_eq!(key[HASH_KEY], AttributeValue::S("42".to_string()));
        assert_eq!(
            key[RANGE_KEY],
            AttributeValue::S("00000000-0000-0000-0000-000000000000".to_string())
        );
    }

    #[test]
    fn test_exclusive_start_key_includes_index_range_key() {
        let cursor = PageCursor::new(
            Uuid::nil(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        );
        let key = exclusive_start_key(42, &cursor);

        assert_eq!(key.len(), 3);
        assert_eq!(
            key[INDEX_RANGE_KEY],
            AttributeValue::S("2024-02-01T00:00:00.000000000Z".to_string())
        );
    }
}
