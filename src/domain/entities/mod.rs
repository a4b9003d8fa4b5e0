//! Core domain entities.
//!
//! - [`User`] - A registered account
//! - [`Post`] - An article written by a user
//!
//! Creation and modification use separate input structs
//! (`NewUser`, `UserChanges`, `NewPost`, `PostChanges`).

pub mod post;
pub mod user;

pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, User, UserChanges};
