//! JSON encoding of cached values.

use crate::user::User;

use super::{CacheError, Result};

/// Serializes a user to JSON bytes.
pub fn serialize_user(user: &User) -> Result<Vec<u8>> {
    serde_json::to_vec(user).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON bytes to a user.
pub fn deserialize_user(bytes: &[u8]) -> Result<User> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}
