//! Repository trait for posts.

use crate::domain::entities::{NewPost, Post, PostChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing posts.
///
/// Every returned [`Post`] carries its author.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPostRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts a new post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the title is already taken.
    /// Returns [`AppError::Validation`] if the author does not exist.
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Lists posts ordered by id.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError>;

    /// Replaces title and content. `Ok(None)` if the post does not exist.
    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, AppError>;

    /// Deletes a post written by `author_id`.
    ///
    /// Returns `false` if no such post exists for that author.
    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
