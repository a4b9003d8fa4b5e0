//! User account service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserChanges};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Service for managing user accounts.
///
/// Passwords are hashed here before they reach the repository. Modifying
/// operations take the id of the authenticated user and only allow users to
/// change their own account.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    bcrypt_cost: u32,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>, bcrypt_cost: u32) -> Self {
        Self {
            repository,
            bcrypt_cost,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or email is already taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn create_user(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let user = self
            .repository
            .create(NewUser {
                name,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Lists users for the given page window.
    pub async fn list_users(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        self.repository.list(offset, limit).await
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    /// Replaces name, email and password of the caller's own account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if `acting_user_id` is not `id`.
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    /// Returns [`AppError::Conflict`] if the new name or email is taken.
    pub async fn update_user(
        &self,
        acting_user_id: i64,
        id: i64,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, AppError> {
        ensure_self(acting_user_id, id)?;

        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let user = self
            .repository
            .update(
                id,
                UserChanges {
                    name,
                    email,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| user_not_found(id))?;

        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Deletes the caller's own account together with their posts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if `acting_user_id` is not `id`.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn delete_user(&self, acting_user_id: i64, id: i64) -> Result<(), AppError> {
        ensure_self(acting_user_id, id)?;

        if !self.repository.delete(id).await? {
            return Err(user_not_found(id));
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Checks that the acting user may modify account `id`.
    ///
    /// Runs before an update body is validated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if `acting_user_id` is not `id`.
    pub fn authorize_edit(&self, acting_user_id: i64, id: i64) -> Result<(), AppError> {
        ensure_self(acting_user_id, id)
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn ensure_self(acting_user_id: i64, id: i64) -> Result<(), AppError> {
    if acting_user_id != id {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Users may only modify their own account"}),
        ));
    }
    Ok(())
}

fn user_not_found(id: i64) -> AppError {
    AppError::not_found("User not found", json!({"id": id}))
}
