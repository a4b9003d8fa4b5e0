//! Helpers shared across layers.
//!
//! - [`db_error`] - Database constraint names to client-facing messages
//! - [`location`] - `Location` header construction for created resources
//! - [`password`] - bcrypt hashing on the blocking thread pool

pub mod db_error;
pub mod location;
pub mod password;
