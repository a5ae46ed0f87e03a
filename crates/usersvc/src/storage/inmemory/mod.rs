//! In-memory store backends.
//!
//! Data lives in maps behind `Arc<RwLock<_>>` and is lost when the last
//! handle is dropped. Used when no persistent backend feature is enabled,
//! and by tests.

mod images;
mod users;

pub use images::InMemoryImageIndex;
pub use users::InMemoryUserRepository;
