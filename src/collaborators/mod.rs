//! Downstream collaborators.
//!
//! # Data Flow
//! ```text
//! Dispatcher (after classification)
//!     → redirect.rs (302 to `redirectUrl`)
//!     → proxy.rs    (fetch `proxyUrl`, optionally rewrite)
//!     → api.rs      (internal todos route table)
//!     → Response, or CollaboratorError for faults
//! ```
//!
//! # Design Decisions
//! - All three implement one capability: [`Handler`]
//! - Collaborators parse their own query parameters
//! - Bad input is a regular 4xx response; only faults are `Err`

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub mod api;
pub mod proxy;
pub mod redirect;

pub use api::ApiHandler;
pub use proxy::ProxyHandler;
pub use redirect::RedirectHandler;

/// A downstream capability: take the original request, produce a response.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: Request<Body>) -> Result<Response, CollaboratorError>;
}

/// Faults raised by a collaborator while producing a response.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Upstream fetch failed (connect, timeout, body stream).
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Inbound request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    /// Inbound request body exceeds the configured limit.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Anything else that went wrong inside the collaborator.
    #[error("internal collaborator error: {0}")]
    Internal(String),
}

impl IntoResponse for CollaboratorError {
    fn into_response(self) -> Response {
        let status = match &self {
            CollaboratorError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            CollaboratorError::Upstream(_) => StatusCode::BAD_GATEWAY,
            CollaboratorError::Body(_) => StatusCode::BAD_REQUEST,
            CollaboratorError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CollaboratorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// First value of a query parameter, percent-decoded. Empty values count as absent.
pub(crate) fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Whether a query parameter is present at all, with or without a value.
pub(crate) fn has_query_param(uri: &Uri, name: &str) -> bool {
    uri.query()
        .map(|query| url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == name))
        .unwrap_or(false)
}

pub(crate) fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, format!("Bad request: {message}")).into_response()
}
