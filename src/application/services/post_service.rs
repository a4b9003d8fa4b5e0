//! Post service enforcing authorship rules.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewPost, Post, PostChanges};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Service for creating, reading, updating and deleting posts.
///
/// Only the author of a post may modify or delete it, and a post can only be
/// created on behalf of the authenticated user.
pub struct PostService<R: PostRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: PostRepository + ?Sized> PostService<R> {
    /// Creates a new post service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a post for the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if `author_id` is not the acting user.
    /// Returns [`AppError::Conflict`] if the title is already taken.
    pub async fn create_post(
        &self,
        acting_user_id: i64,
        title: String,
        content: String,
        author_id: i64,
    ) -> Result<Post, AppError> {
        ensure_author(acting_user_id, author_id)?;

        let post = self
            .repository
            .create(NewPost {
                title,
                content,
                author_id,
            })
            .await?;

        tracing::info!(post_id = post.id, author_id, "Post created");
        Ok(post)
    }

    pub async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError> {
        self.repository.list(offset, limit).await
    }

    /// Retrieves a post by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    pub async fn get_post(&self, id: i64) -> Result<Post, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    /// Loads post `id` and checks that the acting user wrote it.
    ///
    /// Runs before an update body is validated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    /// Returns [`AppError::Unauthorized`] if the acting user is not the author.
    pub async fn authorize_edit(&self, acting_user_id: i64, id: i64) -> Result<Post, AppError> {
        let post = self.get_post(id).await?;

        if !post.is_authored_by(acting_user_id) {
            return Err(not_author());
        }

        Ok(post)
    }

    /// Replaces title and content of a post owned by the acting user.
    ///
    /// `author_id`, when present in the request, must also name the acting
    /// user; posts cannot be handed over to someone else.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    /// Returns [`AppError::Unauthorized`] if the acting user is not the author.
    /// Returns [`AppError::Conflict`] if the new title is already taken.
    pub async fn update_post(
        &self,
        acting_user_id: i64,
        id: i64,
        title: String,
        content: String,
        author_id: Option<i64>,
    ) -> Result<Post, AppError> {
        self.authorize_edit(acting_user_id, id).await?;

        if let Some(author_id) = author_id {
            ensure_author(acting_user_id, author_id)?;
        }

        let post = self
            .repository
            .update(id, PostChanges { title, content })
            .await?
            .ok_or_else(|| post_not_found(id))?;

        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    /// Deletes a post owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    /// Returns [`AppError::Unauthorized`] if the acting user is not the author.
    pub async fn delete_post(&self, acting_user_id: i64, id: i64) -> Result<(), AppError> {
        self.authorize_edit(acting_user_id, id).await?;

        if !self.repository.delete(id, acting_user_id).await? {
            return Err(post_not_found(id));
        }

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    pub async fn count_posts(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn ensure_author(acting_user_id: i64, author_id: i64) -> Result<(), AppError> {
    if acting_user_id != author_id {
        return Err(not_author());
    }
    Ok(())
}

fn not_author() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({"reason": "Only the author may do this"}),
    )
}

fn post_not_found(id: i64) -> AppError {
    AppError::not_found("Post not found", json!({"id": id}))
}
