use crate::image::{PageCursor, UserImage};

/// A descending, soft-delete-filtered range query over one user's images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub user_id: i64,
    /// Maximum number of records to return. Always at least 1.
    pub limit: u32,
    /// Resume strictly after this position.
    pub exclusive_start: Option<PageCursor>,
}

impl ImageQuery {
    /// Creates a query for the first page of a user's images.
    pub fn first_page(user_id: i64, limit: u32) -> Self {
        Self {
            user_id,
            limit: limit.max(1),
            exclusive_start: None,
        }
    }

    /// Sets the continuation point.
    pub fn starting_after(mut self, cursor: Option<PageCursor>) -> Self {
        self.exclusive_start = cursor;
        self
    }
}

/// One page of query results.
///
/// `last_evaluated` is present only when the scan stopped because it hit the
/// limit, and is the continuation point for the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePage {
    pub images: Vec<UserImage>,
    pub last_evaluated: Option<PageCursor>,
}
