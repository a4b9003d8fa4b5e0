//! Post entity.

use chrono::{DateTime, Utc};

use super::User;

/// A post together with its author.
///
/// Repositories always load the author alongside the post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub author: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Returns true if `user_id` wrote this post.
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i64) -> User {
        let now = Utc::now();
        User {
            id,
            name: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_authored_by() {
        let now = Utc::now();
        let post = Post {
            id: 10,
            title: "Hello".to_string(),
            content: "World".to_string(),
            author_id: 3,
            author: author(3),
            created_at: now,
            updated_at: now,
        };

        assert!(post.is_authored_by(3));
        assert!(!post.is_authored_by(4));
    }
}
