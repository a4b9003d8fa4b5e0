//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`, `GET /health`         - Public
//! - `POST /login`                   - Public, stricter rate limit
//! - `/users`, `/posts` reads        - Public
//! - `/users`, `/posts` writes       - Token required (except `POST /users`)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **JSON** - `Content-Type: application/json` on every response
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Signed bearer token on write routes
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::{auth, json, rate_limit, tracing};
use crate::api::routes::{login_routes, protected_routes, public_routes};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = rate_limit::apply(build_routes(state.clone()), behind_proxy)
        .merge(rate_limit::apply_login(login_routes(), behind_proxy));

    NormalizePathLayer::trim_trailing_slash().layer(finish(router, state))
}

/// Routes with authentication, JSON and tracing middleware, but without
/// rate limiting or path normalization.
///
/// Rate limiting keys on the peer address, which in-process test servers
/// do not provide.
pub fn api_router(state: AppState) -> Router {
    let router = build_routes(state.clone()).merge(login_routes());

    finish(router, state)
}

fn build_routes(state: AppState) -> Router<AppState> {
    let protected =
        protected_routes().route_layer(middleware::from_fn_with_state(state, auth::layer));

    public_routes().merge(protected)
}

fn finish(router: Router<AppState>, state: AppState) -> Router {
    router
        .with_state(state)
        .layer(middleware::from_fn(json::layer))
        .layer(tracing::layer())
}
