//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing users.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or email is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by email (exact match on the stored, lower-cased value).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists users ordered by id.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Replaces name, email and password hash of a user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(User))` with the updated row
    /// - `Ok(None)` if no user has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new name or email is already taken.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AppError>;

    /// Deletes a user and, through the foreign key, their posts.
    ///
    /// Returns `false` if no user has this id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all users.
    async fn count(&self) -> Result<i64, AppError>;
}
