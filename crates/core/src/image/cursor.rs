//! The continuation cursor for image listings and its wire form.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::ImageError;

/// Query/response key carrying the continuation image ID.
pub const LAST_KEY: &str = "lastKey";
/// Query/response key carrying the continuation capture timestamp.
pub const LAST_KEY_DATE: &str = "lastKeyDate";

/// Position of the last record returned by a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub last_image_id: Uuid,
    pub last_taken_at: DateTime<Utc>,
}

impl PageCursor {
    pub fn new(last_image_id: Uuid, last_taken_at: DateTime<Utc>) -> Self {
        Self {
            last_image_id,
            last_taken_at,
        }
    }

    /// Renders the cursor as the `{lastKey, lastKeyDate}` wire map.
    pub fn to_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (LAST_KEY.to_string(), self.last_image_id.to_string()),
            (LAST_KEY_DATE.to_string(), format_timestamp(&self.last_taken_at)),
        ])
    }

    /// Parses the two wire fields. Empty strings count as absent.
    ///
    /// Both absent is `Ok(None)`; exactly one present, or either malformed,
    /// is an error.
    pub fn from_params(
        last_key: Option<&str>,
        last_key_date: Option<&str>,
    ) -> Result<Option<Self>, ImageError> {
        let last_key = last_key.filter(|s| !s.is_empty());
        let last_key_date = last_key_date.filter(|s| !s.is_empty());

        match (last_key, last_key_date) {
            (None, None) => Ok(None),
            (Some(key), Some(date)) => {
                let last_image_id = Uuid::parse_str(key)
                    .map_err(|_| ImageError::InvalidCursorImageId(key.to_string()))?;
                let last_taken_at = parse_timestamp(date)
                    .ok_or_else(|| ImageError::InvalidCursorDate(date.to_string()))?;
                Ok(Some(Self::new(last_image_id, last_taken_at)))
            }
            _ => Err(ImageError::IncompleteCursor),
        }
    }
}

/// Formats a timestamp as fixed-width RFC 3339 in UTC with nanoseconds.
///
/// The fixed width keeps lexical order equal to chronological order, which
/// stores that sort timestamps as strings rely on.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parses an RFC 3339 timestamp with any offset into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
