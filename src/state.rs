use std::sync::Arc;

use crate::application::services::{AuthService, PostService, UserService};
use crate::domain::repositories::{PostRepository, UserRepository};

/// Shared state injected into every handler.
///
/// Services are built over trait objects so the same router runs against
/// PostgreSQL in production and against in-memory repositories in tests.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<dyn UserRepository>>,
    pub post_service: Arc<PostService<dyn PostRepository>>,
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
}

impl AppState {
    /// Wires services on top of the given repositories.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        post_repository: Arc<dyn PostRepository>,
        api_secret: &str,
        token_ttl_seconds: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(user_repository.clone(), bcrypt_cost)),
            post_service: Arc::new(PostService::new(post_repository)),
            auth_service: Arc::new(AuthService::new(
                user_repository,
                api_secret,
                token_ttl_seconds,
            )),
        }
    }
}
