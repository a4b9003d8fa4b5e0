//! Handlers for post endpoints.

use axum::{
    Extension, Json,
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::post::{CreatePostRequest, PostItem, UpdatePostRequest};
use crate::api::extract::{JsonBody, PathParam, QueryParams};
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::location::resource_location;

/// Creates a post written by the caller.
///
/// # Endpoint
///
/// `POST /posts` (token required)
///
/// # Request Body
///
/// ```json
/// { "title": "Hello", "content": "First post", "author_id": 1 }
/// ```
///
/// `author_id` must be the id carried by the token.
///
/// # Errors
///
/// Returns 422 if the body fails validation.
/// Returns 401 if `author_id` is not the caller.
/// Returns 409 if the title is already taken.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let post = state
        .post_service
        .create_post(auth.user_id, payload.title, payload.content, payload.author_id)
        .await?;

    let location = resource_location(&headers, &uri, post.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PostItem::from(post)),
    ))
}

/// Lists posts with their authors.
///
/// # Endpoint
///
/// `GET /posts?page=1&page_size=100`
pub async fn list_posts_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> Result<Json<Vec<PostItem>>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let posts = state.post_service.list_posts(offset, limit).await?;

    Ok(Json(posts.into_iter().map(PostItem::from).collect()))
}

/// Fetches one post.
///
/// # Endpoint
///
/// `GET /posts/{id}`
///
/// # Errors
///
/// Returns 400 if `id` is not an integer.
/// Returns 404 if the post does not exist.
pub async fn get_post_handler(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<PostItem>, AppError> {
    let post = state.post_service.get_post(id).await?;

    Ok(Json(post.into()))
}

/// Replaces title and content of the caller's post.
///
/// # Endpoint
///
/// `PUT /posts/{id}` (token required)
///
/// # Errors
///
/// Returns 404 if the post does not exist.
/// Returns 401 if the caller is not the author.
/// Returns 422 if the body fails validation.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdatePostRequest>,
) -> Result<Json<PostItem>, AppError> {
    state.post_service.authorize_edit(auth.user_id, id).await?;
    payload.validate()?;

    let post = state
        .post_service
        .update_post(
            auth.user_id,
            id,
            payload.title,
            payload.content,
            payload.author_id,
        )
        .await?;

    Ok(Json(post.into()))
}

/// Deletes the caller's post.
///
/// # Endpoint
///
/// `DELETE /posts/{id}` (token required)
///
/// # Response
///
/// `204 No Content` with `Entity: {id}`.
///
/// # Errors
///
/// Returns 404 if the post does not exist.
/// Returns 401 if the caller is not the author.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    PathParam(id): PathParam<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.post_service.delete_post(auth.user_id, id).await?;

    Ok((StatusCode::NO_CONTENT, [("entity", id.to_string())]))
}
