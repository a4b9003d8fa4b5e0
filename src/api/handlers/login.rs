//! Handler for the login endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::login::{LoginRequest, LoginResponse};
use crate::api::extract::JsonBody;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges email and password for a signed token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "hunter2" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiJ9..." }
/// ```
///
/// # Errors
///
/// Returns 422 if the body is malformed or fails validation.
/// Returns 401 if the credentials are wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}
