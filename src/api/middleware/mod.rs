//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, content-type, rate limiting, and observability
//! middleware.

pub mod auth;
pub mod json;
pub mod rate_limit;
pub mod tracing;
