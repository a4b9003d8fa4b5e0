//! DTOs for post endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::input;
use super::user::UserItem;
use crate::domain::entities::Post;

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(min = 1, message = "Required Content"))]
    pub content: String,

    #[serde(default)]
    #[validate(range(min = 1, message = "Required Author"))]
    pub author_id: i64,
}

/// Request body for `PUT /posts/{id}`.
///
/// `author_id` is optional; when sent it must be the caller's id.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(min = 1, message = "Required Content"))]
    pub content: String,

    pub author_id: Option<i64>,
}

/// A post with its embedded author.
#[derive(Debug, Serialize)]
pub struct PostItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: UserItem,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostItem {
    fn from(p: Post) -> Self {
        PostItem {
            id: p.id,
            title: p.title,
            content: p.content,
            author: p.author.into(),
            author_id: p.author_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_valid() {
        let req: CreatePostRequest = serde_json::from_value(json!({
            "title": " Hello ",
            "content": "World",
            "author_id": 1
        }))
        .unwrap();

        assert_eq!(req.title, "Hello");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_missing_author() {
        let req: CreatePostRequest =
            serde_json::from_value(json!({"title": "Hello", "content": "World"})).unwrap();

        assert!(req.validate().unwrap_err().field_errors().contains_key("author_id"));
    }

    #[test]
    fn test_update_request_blank_content() {
        let req: UpdatePostRequest =
            serde_json::from_value(json!({"title": "Hello", "content": "  "})).unwrap();

        assert!(req.author_id.is_none());
        assert!(req.validate().unwrap_err().field_errors().contains_key("content"));
    }
}
