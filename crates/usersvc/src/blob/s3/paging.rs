//! Listing continuation and `DeleteObjects` batching.
//!
//! Pure functions apart from the page fetch handed to [`collect_keys`].

use std::future::Future;

use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};

use usersvc_core::blob::{BlobError, Result};

/// `DeleteObjects` accepts at most this many keys per call.
pub const MAX_DELETE_BATCH: usize = 1000;

/// Token for the next `ListObjectsV2` call, if the listing goes on.
///
/// A page that is not truncated ends the listing even when it carries a
/// token; a truncated page without one ends it too.
pub fn next_token(page: &ListObjectsV2Output) -> Option<String> {
    match page.next_continuation_token() {
        Some(next) if page.is_truncated().unwrap_or(false) => Some(next.to_string()),
        _ => None,
    }
}

/// Object keys on one listing page, in listing order.
pub fn page_keys(page: &ListObjectsV2Output) -> impl Iterator<Item = String> + '_ {
    page.contents()
        .iter()
        .filter_map(|object| object.key().map(str::to_string))
}

/// Follows continuation tokens from the first page to the last.
///
/// `fetch` receives `None` for the first page and the previous page's token
/// afterwards.
pub async fn collect_keys<F, Fut>(mut fetch: F) -> Result<Vec<String>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListObjectsV2Output>>,
{
    let mut keys = Vec::new();
    let mut token = None;
    loop {
        let page = fetch(token).await?;
        keys.extend(page_keys(&page));
        token = next_token(&page);
        if token.is_none() {
            return Ok(keys);
        }
    }
}

/// One quiet `Delete` request per [`MAX_DELETE_BATCH`] keys.
pub fn delete_requests(keys: &[String]) -> Result<Vec<Delete>> {
    keys.chunks(MAX_DELETE_BATCH).map(delete_request).collect()
}

fn delete_request(keys: &[String]) -> Result<Delete> {
    let objects = keys
        .iter()
        .map(|key| ObjectIdentifier::builder().key(key).build())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| BlobError::OperationFailed(e.to_string()))?;

    Delete::builder()
        .set_objects(Some(objects))
        .quiet(true)
        .build()
        .map_err(|e| BlobError::OperationFailed(e.to_string()))
}
