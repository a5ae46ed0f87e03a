use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use usersvc_core::storage::{RepositoryError, Result, UserRepository};
use usersvc_core::user::{NewUser, User};

#[derive(Debug, Default)]
struct UserTable {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

/// In-memory user store. IDs are assigned sequentially from 1 and emails are
/// unique, matching the SQLite backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: i64) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "User",
        id: id.to_string(),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }
        table.last_id += 1;
        let created = user.clone().into_user(table.last_id);
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(not_found(user.id)),
        }
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser::new("Test User", email, "1 Test Lane", 30)
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create_user(&new_user("a@example.com")).await.unwrap();
        let second = repo.create_user(&new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_user(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&new_user("a@example.com")).await.unwrap();

        let result = repo.create_user(&new_user("a@example.com")).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryUserRepository::new();
        for email in ["c@example.com", "a@example.com", "b@example.com"] {
            repo.create_user(&new_user(email)).await.unwrap();
        }
        let ids: Vec<i64> = repo.list_users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_and_delete_nonexistent() {
        let repo = InMemoryUserRepository::new();
        let ghost = new_user("ghost@example.com").into_user(99);

        assert!(matches!(
            repo.update_user(&ghost).await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete_user(99).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(&new_user("a@example.com")).await.unwrap();

        repo.delete_user(user.id).await.unwrap();
        assert!(repo.get_user(user.id).await.unwrap().is_none());
    }
}
