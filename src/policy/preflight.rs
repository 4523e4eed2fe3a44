//! Preflight short-circuiting.
//!
//! # Responsibilities
//! - Recognize genuine CORS preflights (Origin + both Access-Control-Request-* headers)
//! - Recognize bare OPTIONS requests
//! - Answer both locally so collaborators never see preflight traffic

use axum::body::Body;
use axum::http::{header, Method, Request, Response};

use crate::policy::origin::OriginPolicy;

/// Why a request was answered without delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightKind {
    /// Browser preflight carrying the full header trio.
    Cors,
    /// `OPTIONS` without the full trio.
    BareOptions,
}

impl PreflightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreflightKind::Cors => "cors",
            PreflightKind::BareOptions => "options",
        }
    }
}

/// Classify a request as non-substantive, if it is one.
///
/// Header values are not inspected; presence is enough.
pub fn detect<B>(request: &Request<B>) -> Option<PreflightKind> {
    let headers = request.headers();
    if headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_HEADERS)
    {
        return Some(PreflightKind::Cors);
    }

    if request.method() == Method::OPTIONS {
        return Some(PreflightKind::BareOptions);
    }

    None
}

/// Answer a preflight or bare `OPTIONS` request locally.
///
/// Returns `None` when the request must continue to routing.
pub fn maybe_short_circuit<B>(
    request: &Request<B>,
    policy: &OriginPolicy,
) -> Option<Response<Body>> {
    let kind = detect(request)?;
    tracing::debug!(
        kind = kind.as_str(),
        method = %request.method(),
        path = %request.uri().path(),
        "Short-circuiting preflight"
    );
    Some(policy.empty_response())
}
