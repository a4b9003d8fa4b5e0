//! DTOs for the login endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::input;

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "input::email")]
    #[validate(length(min = 1, message = "Required Email"))]
    #[validate(email(message = "Invalid Email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Required Password"))]
    pub password: String,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
