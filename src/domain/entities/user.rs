//! User entity.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `password_hash` holds a bcrypt hash and never leaves the service layer;
/// API responses are built from [`crate::api::dto::user::UserItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Full replacement of a user's mutable fields.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_clone_eq() {
        let now = Utc::now();
        let user = User {
            id: 1,
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            created_at: now,
            updated_at: now,
        };

        assert_eq!(user.clone(), user);
    }
}
