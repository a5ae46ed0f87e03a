mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::user_key;
pub use serialization::{deserialize_user, serialize_user};
pub use traits::Cache;
