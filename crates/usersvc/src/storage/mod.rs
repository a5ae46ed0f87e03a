//! Store backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `usersvc_core::storage`, selected at compile time:
//!
//! - `sqlite`: users in SQLite through `rusqlite` and `tokio-rusqlite`
//! - `dynamodb`: the image index in DynamoDB through `aws-sdk-dynamodb`
//!
//! Without a feature the matching in-memory backend is used.
//!
//! ```bash
//! cargo build -p usersvc --features sqlite,dynamodb
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
