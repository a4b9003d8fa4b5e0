//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. String inputs are trimmed while deserializing (see
//! [`input`]), so validation sees the prepared value.

pub mod health;
pub mod home;
pub mod input;
pub mod login;
pub mod pagination;
pub mod post;
pub mod user;
