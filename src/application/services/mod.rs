//! Business logic services for the application layer.

pub mod auth_service;
pub mod post_service;
pub mod user_service;

pub use auth_service::{AuthService, Claims};
pub use post_service::PostService;
pub use user_service::UserService;
