//! DynamoDB image index.
//!
//! Table keyed by `UserID` (hash) and `ImageID` (range), with a local
//! secondary index on `TakenAt` for newest-first listings.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbImageIndex;
