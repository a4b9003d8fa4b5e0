//! Handlers for user endpoints.

use axum::{
    Extension, Json,
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::user::{
    UserCreatedResponse, UserGottenResponse, UserItem, UserListResponse, UserRequest,
    UserUpdatedResponse,
};
use crate::api::extract::{JsonBody, PathParam, QueryParams};
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::location::resource_location;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// { "name": "alice", "email": "alice@example.com", "password": "hunter2" }
/// ```
///
/// # Response
///
/// `201 Created` with `Location: {host}/users/{id}` and
/// `{"userCreated": {...}}`.
///
/// # Errors
///
/// Returns 422 if the body is malformed or fails validation.
/// Returns 409 if the name or email is already taken.
pub async fn create_user_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .create_user(payload.name, payload.email, payload.password)
        .await?;

    let location = resource_location(&headers, &uri, user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserCreatedResponse {
            user_created: user.into(),
        }),
    ))
}

/// Lists users.
///
/// # Endpoint
///
/// `GET /users?page=1&page_size=100`
///
/// # Errors
///
/// Returns 400 if pagination parameters are out of range.
pub async fn list_users_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> Result<Json<UserListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let users = state.user_service.list_users(offset, limit).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserItem::from).collect(),
    }))
}

/// Fetches one user.
///
/// # Endpoint
///
/// `GET /users/{id}`
///
/// # Errors
///
/// Returns 400 if `id` is not an integer.
/// Returns 404 if the user does not exist.
pub async fn get_user_handler(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<UserGottenResponse>, AppError> {
    let user = state.user_service.get_user(id).await?;

    Ok(Json(UserGottenResponse {
        user_gotten: user.into(),
    }))
}

/// Replaces the caller's own account details.
///
/// # Endpoint
///
/// `PUT /users/{id}` (token required)
///
/// # Errors
///
/// Returns 401 if the token does not belong to user `id`.
/// Returns 422 if the body fails validation.
/// Returns 409 if the new name or email is taken.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<UserRequest>,
) -> Result<Json<UserUpdatedResponse>, AppError> {
    state.user_service.authorize_edit(auth.user_id, id)?;
    payload.validate()?;

    let user = state
        .user_service
        .update_user(auth.user_id, id, payload.name, payload.email, payload.password)
        .await?;

    Ok(Json(UserUpdatedResponse {
        updated_user: user.into(),
    }))
}

/// Deletes the caller's own account and all of their posts.
///
/// # Endpoint
///
/// `DELETE /users/{id}` (token required)
///
/// # Response
///
/// `204 No Content` with `Entity: {id}`.
///
/// # Errors
///
/// Returns 401 if the token does not belong to user `id`.
/// Returns 404 if the user does not exist.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete_user(auth.user_id, id).await?;

    Ok((StatusCode::NO_CONTENT, [("entity", id.to_string())]))
}
