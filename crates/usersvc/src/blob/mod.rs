//! Blob store implementations of `usersvc_core::blob::BlobStore`.
//!
//! The `s3` feature selects S3; otherwise blobs are kept in memory.

mod memory;

#[cfg(feature = "s3")]
pub mod s3;

pub use memory::MemoryBlobStore;
