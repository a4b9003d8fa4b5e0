//! JSON content-type middleware.

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Marks every response as `application/json` unless a handler already set
/// a content type.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(home_handler))
///     .layer(axum::middleware::from_fn(json::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    response
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));

    response
}
