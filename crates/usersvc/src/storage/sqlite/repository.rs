//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use usersvc_core::storage::{RepositoryError, Result, UserRepository};
use usersvc_core::user::{NewUser, User};

use super::conversions::row_to_user;
use super::error::map_tokio_rusqlite_error_with_id;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Fails with `QueryReturnedNoRows` when a write touched nothing.
fn expect_changed(rows: usize) -> std::result::Result<(), tokio_rusqlite::Error> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-backed user store.
pub struct SqliteUserRepository {
    conn: Connection,
}

impl SqliteUserRepository {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository over an in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let new_user = user.clone();
        let email = user.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![
                        new_user.name,
                        new_user.email,
                        new_user.address,
                        new_user.age
                    ],
                )
                .map_err(wrap_err)?;
                Ok(new_user.into_user(conn.last_insert_rowid()))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", email))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_USERS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_user).map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    users.push(row_result.map_err(wrap_err)?);
                }
                Ok(users)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let id = user.id;
        let name = user.name.clone();
        let address = user.address.clone();
        let age = user.age;

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_USER, rusqlite::params![id, name, address, age])
                    .map_err(wrap_err)?;
                expect_changed(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_USER, [id])
                    .map_err(wrap_err)?;
                expect_changed(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteUserRepository {
        SqliteUserRepository::new_in_memory().await.unwrap()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser::new("Ken Thompson", email, "Murray Hill", 81)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo().await;
        let created = repo.create_user(&new_user("ken@example.com")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(repo.get_user(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        assert!(repo().await.get_user(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let repo = repo().await;
        repo.create_user(&new_user("ken@example.com")).await.unwrap();

        let result = repo.create_user(&new_user("ken@example.com")).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_list_users_ordered_by_id() {
        let repo = repo().await;
        repo.create_user(&new_user("b@example.com")).await.unwrap();
        repo.create_user(&new_user("a@example.com")).await.unwrap();

        let emails: Vec<String> = repo
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, vec!["b@example.com", "a@example.com"]);
    }

    #[tokio::test]
    async fn test_update_keeps_email() {
        let repo = repo().await;
        let created = repo.create_user(&new_user("ken@example.com")).await.unwrap();

        let changed = User {
            name: "Kenneth Thompson".to_string(),
            email: "other@example.com".to_string(),
            ..created.clone()
        };
        repo.update_user(&changed).await.unwrap();

        let stored = repo.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Kenneth Thompson");
        assert_eq!(stored.email, "ken@example.com");
    }

    #[tokio::test]
    async fn test_update_and_delete_nonexistent() {
        let repo = repo().await;
        let ghost = new_user("ghost@example.com").into_user(9);

        assert!(matches!(
            repo.update_user(&ghost).await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete_user(9).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let created = repo.create_user(&new_user("ken@example.com")).await.unwrap();

        repo.delete_user(created.id).await.unwrap();
        assert!(repo.get_user(created.id).await.unwrap().is_none());
    }
}
