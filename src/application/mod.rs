//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login and signed token handling
//! - [`services::user_service::UserService`] - User accounts
//! - [`services::post_service::PostService`] - Posts and authorship rules

pub mod services;
