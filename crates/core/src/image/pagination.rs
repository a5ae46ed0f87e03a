use std::cmp::Ordering;

use crate::storage::{ImagePage, ImageQuery};

use super::{PageCursor, UserImage};

/// Newest first; ties on capture time break on image ID, also descending.
pub fn descending(a: &UserImage, b: &UserImage) -> Ordering {
    b.taken_at
        .cmp(&a.taken_at)
        .then_with(|| b.image_id.cmp(&a.image_id))
}

fn is_after(image: &UserImage, cursor: &PageCursor) -> bool {
    (image.taken_at, image.image_id) < (cursor.last_taken_at, cursor.last_image_id)
}

/// Answers an [`ImageQuery`] over an in-memory set of records.
///
/// Keeps the user's live records that sort strictly after the query's
/// cursor, takes `limit` of them, and sets `last_evaluated` only when more
/// records remain.
pub fn paginate<'a, I>(records: I, query: &ImageQuery) -> ImagePage
where
    I: IntoIterator<Item = &'a UserImage>,
{
    let mut live: Vec<&UserImage> = records
        .into_iter()
        .filter(|image| image.user_id == query.user_id && !image.is_deleted)
        .filter(|image| {
            query
                .exclusive_start
                .as_ref()
                .is_none_or(|cursor| is_after(image, cursor))
        })
        .collect();
    live.sort_by(|a, b| descending(a, b));

    let limit = query.limit.max(1) as usize;
    let truncated = live.len() > limit;
    let images: Vec<UserImage> = live.into_iter().take(limit).cloned().collect();
    let last_evaluated = if truncated {
        images.last().map(UserImage::cursor)
    } else {
        None
    };

    ImagePage {
        images,
        last_evaluated,
    }
}
