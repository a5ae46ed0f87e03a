//! SQLite schema definitions and SQL query constants.

/// Creates the users table. Idempotent.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    address TEXT NOT NULL,
    age INTEGER NOT NULL
);
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (name, email, address, age)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email, address, age
FROM users
WHERE id = ?1
"#;

pub const SELECT_ALL_USERS: &str = r#"
SELECT id, name, email, address, age
FROM users
ORDER BY id ASC
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = ?2, address = ?3, age = ?4
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent_ddl() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(CREATE_TABLES.contains("email TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_update_never_touches_email() {
        assert!(!UPDATE_USER.contains("email"));
    }
}
