//! Redirect collaborator.
//!
//! `GET /redirect?redirectUrl=<absolute url>` answers `302 Found` pointing at
//! the given URL.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::collaborators::{bad_request, query_param, CollaboratorError, Handler};

pub const REDIRECT_URL_PARAM: &str = "redirectUrl";

#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectHandler;

impl RedirectHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for RedirectHandler {
    async fn handle(&self, request: Request<Body>) -> Result<Response, CollaboratorError> {
        let Some(target) = query_param(request.uri(), REDIRECT_URL_PARAM) else {
            return Ok(bad_request("Missing `redirectUrl` query param"));
        };

        let target = match Url::parse(&target) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(target_url = %target, error = %e, "Rejecting redirect target");
                return Ok(bad_request("Invalid `redirectUrl` query param"));
            }
        };

        Ok((StatusCode::FOUND, [(header::LOCATION, target.as_str())]).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn call(uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        RedirectHandler::new().handle(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_redirects_to_target() {
        let response = call("/redirect?redirectUrl=https://example.com/").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get("location").unwrap(), "https://example.com/");
    }

    #[tokio::test]
    async fn test_missing_param() {
        for uri in ["/redirect", "/redirect?redirectUrl=", "/redirect?other=1"] {
            let response = call(uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_text(response).await,
                "Bad request: Missing `redirectUrl` query param"
            );
        }
    }

    #[tokio::test]
    async fn test_relative_target_rejected() {
        let response = call("/redirect?redirectUrl=/somewhere").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("location").is_none());
    }
}
