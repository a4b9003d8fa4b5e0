//! Token-validity gate.

use axum::{
    extract::{FromRequestParts, Query, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

/// The authenticated caller, placed in request extensions by [`layer`].
///
/// Handlers behind the gate take it as `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Authenticates requests carrying a signed token.
///
/// # Token Sources
///
/// 1. `Authorization: Bearer <token>` header
/// 2. `?token=<token>` query parameter, when the header is absent
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if no token
/// is present or if it fails signature or expiry checks.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::put, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/users/{id}", put(update_user_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = extract_token(&mut parts).await.ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Authorization header is missing or invalid"}),
        )
    })?;

    let claims = st.auth_service.verify_token(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(req).await)
}

async fn extract_token(parts: &mut Parts) -> Option<String> {
    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(parts, &()).await {
        return Some(token);
    }

    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request as HttpRequest, header};

    async fn token_of(req: HttpRequest<()>) -> Option<String> {
        let (mut parts, _) = req.into_parts();
        extract_token(&mut parts).await
    }

    #[tokio::test]
    async fn test_token_from_bearer_header() {
        let req = HttpRequest::builder()
            .uri("/posts")
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(())
            .unwrap();

        assert_eq!(token_of(req).await.as_deref(), Some("abc.def.ghi"));
    }

    #[tokio::test]
    async fn test_token_from_query() {
        let req = HttpRequest::builder()
            .uri("/posts?token=abc.def.ghi")
            .body(())
            .unwrap();

        assert_eq!(token_of(req).await.as_deref(), Some("abc.def.ghi"));
    }

    #[tokio::test]
    async fn test_header_wins_over_query() {
        let req = HttpRequest::builder()
            .uri("/posts?token=from-query")
            .header(header::AUTHORIZATION, "Bearer from-header")
            .body(())
            .unwrap();

        assert_eq!(token_of(req).await.as_deref(), Some("from-header"));
    }

    #[tokio::test]
    async fn test_no_token() {
        let req = HttpRequest::builder().uri("/posts").body(()).unwrap();

        assert!(token_of(req).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_query_token_is_ignored() {
        let req = HttpRequest::builder()
            .uri("/posts?token=")
            .body(())
            .unwrap();

        assert!(token_of(req).await.is_none());
    }
}
