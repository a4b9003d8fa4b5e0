//! API route configuration.
//!
//! Routes are grouped by their authentication requirement; the top-level
//! router in [`crate::routes`] attaches the matching middleware.

use crate::api::handlers::{
    create_post_handler, create_user_handler, delete_post_handler, delete_user_handler,
    get_post_handler, get_user_handler, health_handler, home_handler, list_posts_handler,
    list_users_handler, login_handler, update_post_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes reachable without a token.
///
/// # Endpoints
///
/// - `GET  /`            - Welcome message
/// - `GET  /health`      - Health check with database status
/// - `POST /users`       - Register a user
/// - `GET  /users`       - List users (paginated)
/// - `GET  /users/{id}`  - Fetch a user
/// - `GET  /posts`       - List posts (paginated)
/// - `GET  /posts/{id}`  - Fetch a post
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/{id}", get(get_user_handler))
        .route("/posts", get(list_posts_handler))
        .route("/posts/{id}", get(get_post_handler))
}

/// `POST /login`, kept apart so it gets its own rate limit bucket.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_handler))
}

/// Routes that require a valid token.
///
/// # Endpoints
///
/// - `POST   /posts`       - Create a post
/// - `PUT    /users/{id}`  - Update own account
/// - `DELETE /users/{id}`  - Delete own account
/// - `PUT    /posts/{id}`  - Update own post
/// - `DELETE /posts/{id}`  - Delete own post
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post_handler))
        .route(
            "/users/{id}",
            put(update_user_handler).delete(delete_user_handler),
        )
        .route(
            "/posts/{id}",
            put(update_post_handler).delete(delete_post_handler),
        )
}
