use axum::http::{HeaderMap, Uri, header};

/// Builds the `Location` value for a newly created resource: `{host}{path}/{id}`.
///
/// Falls back to a host-less path when the request carries no `Host` header.
pub fn resource_location(headers: &HeaderMap, uri: &Uri, id: i64) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    format!("{}{}/{}", host, uri.path().trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_location_with_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("api.example.com"));
        let uri: Uri = "/users".parse().unwrap();

        assert_eq!(
            resource_location(&headers, &uri, 42),
            "api.example.com/users/42"
        );
    }

    #[test]
    fn test_location_trailing_slash() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8080"));
        let uri: Uri = "/posts/".parse().unwrap();

        assert_eq!(resource_location(&headers, &uri, 7), "localhost:8080/posts/7");
    }

    #[test]
    fn test_location_without_host() {
        let uri: Uri = "/users?x=1".parse().unwrap();

        assert_eq!(resource_location(&HeaderMap::new(), &uri, 1), "/users/1");
    }
}
