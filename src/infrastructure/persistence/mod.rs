//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgPostRepository`] - Posts joined with their authors

pub mod pg_post_repository;
pub mod pg_user_repository;

pub use pg_post_repository::PgPostRepository;
pub use pg_user_repository::PgUserRepository;
