//! DTOs for user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::input;
use crate::domain::entities::User;
use crate::utils::password::MAX_PASSWORD_BYTES;

/// Request body for `POST /users` and `PUT /users/{id}`.
///
/// Updates replace every field, so both endpoints share one shape.
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[serde(default, deserialize_with = "input::trimmed")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[serde(default, deserialize_with = "input::email")]
    #[validate(length(min = 1, max = 100, message = "Email must be 1-100 characters"))]
    #[validate(email(message = "Invalid Email"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

/// bcrypt only looks at the first 72 bytes, so longer input is rejected
/// rather than silently truncated.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("required").with_message("Required Password".into()));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("too_long")
            .with_message(format!("Password must be at most {MAX_PASSWORD_BYTES} bytes").into()));
    }

    Ok(())
}

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(u: User) -> Self {
        UserItem {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedResponse {
    pub user_created: UserItem,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGottenResponse {
    pub user_gotten: UserItem,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdatedResponse {
    pub updated_user: UserItem,
}
