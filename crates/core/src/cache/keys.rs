/// Returns the cache key for a user.
pub fn user_key(user_id: i64) -> String {
    format!("user:{user_id}")
}
