//! Static help page served for unclassified paths.

use axum::http::header;
use axum::response::{IntoResponse, Response};

pub const HELP_PAGE: &str = r#"Try making requests to:
      <ul>
      <li><code><a href="/redirect?redirectUrl=https://example.com/">/redirect?redirectUrl=https://example.com/</a></code>,</li>
      <li><code><a href="/proxy?modify&proxyUrl=https://example.com/">/proxy?modify&proxyUrl=https://example.com/</a></code>, or</li>
      <li><code><a href="/api/todos">/api/todos</a></code></li>
      </ul>"#;

/// `200 OK`, `content-type: text/html`, links to the three entry points.
pub fn help_page() -> Response {
    ([(header::CONTENT_TYPE, "text/html")], HELP_PAGE).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_help_page() {
        let response = help_page();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("content-type").unwrap(), "text/html");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("/redirect?redirectUrl="));
        assert!(body.contains("/proxy?modify&proxyUrl="));
        assert!(body.contains("/api/todos"));
    }
}
