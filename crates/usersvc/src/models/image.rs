use serde::Deserialize;

use usersvc_core::image::{ImageError, PaginatedInput};

/// Query string of `GET /user-images`.
///
/// Values stay raw strings so that a bad `limit` falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListImagesQuery {
    pub last_key: Option<String>,
    pub last_key_date: Option<String>,
    pub limit: Option<String>,
}

impl ListImagesQuery {
    pub fn into_input(self, user_id: i64) -> Result<PaginatedInput, ImageError> {
        PaginatedInput::from_query(
            user_id,
            self.last_key.as_deref(),
            self.last_key_date.as_deref(),
            self.limit.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keys_are_camel_case() {
        let query: ListImagesQuery = serde_json::from_value(serde_json::json!({
            "lastKey": "0190a4b2-7c1e-7d3a-9f00-00000000000a",
            "lastKeyDate": "2024-01-01T00:00:00Z",
            "limit": "x"
        }))
        .unwrap();

        let input = query.into_input(7).unwrap();
        assert_eq!(input.user_id, 7);
        assert_eq!(input.limit, 10);
        assert!(input.cursor.is_some());
    }
}
