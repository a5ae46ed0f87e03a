//! S3 blob store.

mod error;
mod paging;
mod store;

pub use store::S3BlobStore;
