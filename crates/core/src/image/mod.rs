mod cursor;
mod error;
mod layout;
mod pagination;
mod types;

pub use cursor::{format_timestamp, parse_timestamp, PageCursor, LAST_KEY, LAST_KEY_DATE};
pub use error::ImageError;
pub use layout::{extension_of, BlobLayout};
pub use pagination::{descending, paginate};
pub use types::{
    parse_image_id, parse_limit, ImageMetadata, ImageResponse, ImageUpload, NextPage,
    PaginatedImageResponse, PaginatedInput, UploadResponse, UserImage, DEFAULT_PAGE_LIMIT,
};
