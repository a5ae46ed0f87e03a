use std::sync::Arc;

use usersvc_core::service::{Result, ServiceError};
use usersvc_core::storage::UserRepository;
use usersvc_core::user::{validate_new_user, validate_profile, NewUser, User};

/// User CRUD over the relational store. Caching is left to the HTTP layer.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

/// Writes report every failure as a storage failure.
fn write_failed(err: impl std::fmt::Display) -> ServiceError {
    ServiceError::Storage(err.to_string())
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Stores a new user. A duplicate email is a storage failure.
    pub async fn add(&self, new_user: NewUser) -> Result<User> {
        validate_new_user(&new_user)?;
        let user = self.repo.create_user(&new_user).await.map_err(write_failed)?;
        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.repo
            .get_user(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User not found: {id}")))
    }

    pub async fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.repo.list_users().await?)
    }

    /// Overwrites every field except ID and email.
    pub async fn update(&self, id: i64, patch: NewUser) -> Result<User> {
        validate_profile(&patch)?;
        let existing = self.get(id).await?;
        let updated = patch.apply_to(&existing);
        self.repo.update_user(&updated).await.map_err(write_failed)?;
        tracing::info!(user_id = id, "user updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get(id).await?;
        self.repo.delete_user(id).await.map_err(write_failed)?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
