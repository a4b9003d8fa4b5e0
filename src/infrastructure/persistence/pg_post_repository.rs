//! PostgreSQL implementation of post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPost, Post, PostChanges, User};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Column list shared by every query: the post row joined with its author.
///
/// Queries alias the post relation as `p` and the author as `u`.
const POST_COLUMNS: &str = r#"
    p.id, p.title, p.content, p.author_id, p.created_at, p.updated_at,
    u.name          AS author_name,
    u.email         AS author_email,
    u.password_hash AS author_password_hash,
    u.created_at    AS author_created_at,
    u.updated_at    AS author_updated_at
"#;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: String,
    author_email: String,
    author_password_hash: String,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            title: r.title,
            content: r.content,
            author_id: r.author_id,
            author: User {
                id: r.author_id,
                name: r.author_name,
                email: r.author_email,
                password_hash: r.author_password_hash,
                created_at: r.author_created_at,
                updated_at: r.author_updated_at,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for posts.
///
/// Inserts and updates run as data-modifying CTEs so the author is joined in
/// the same round trip.
pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO posts (title, content, author_id)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.author_id
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(new_post.title)
            .bind(new_post.content)
            .bind(new_post.author_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Post::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.id
            OFFSET $1
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, AppError> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE posts SET
                    title      = $2,
                    content    = $3,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.author_id
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.content)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
