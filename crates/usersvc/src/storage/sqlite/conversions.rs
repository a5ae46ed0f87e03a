//! SQLite row conversion functions.

use rusqlite::Row;

use usersvc_core::user::User;

/// Converts a SQLite row to a User.
///
/// Expected columns: id, name, email, address, age
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        address: row.get(3)?,
        age: row.get(4)?,
    })
}
