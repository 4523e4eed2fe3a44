//! The fixed origin policy and the applier that stamps it onto responses.

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, Response};

/// Process-wide cross-origin policy.
///
/// Four header/value pairs, identical for every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginPolicy {
    /// Value of `Access-Control-Allow-Origin`.
    pub allow_origin: &'static str,
    /// Value of `Access-Control-Allow-Headers`.
    pub allow_headers: &'static str,
    /// Value of `Access-Control-Allow-Methods`.
    pub allow_methods: &'static str,
    /// Value of `Access-Control-Max-Age` (seconds a preflight may be cached).
    pub max_age: &'static str,
}

/// The policy applied to every response the dispatcher produces.
pub const ORIGIN_POLICY: OriginPolicy = OriginPolicy {
    allow_origin: "*",
    allow_headers: "*",
    allow_methods: "GET,HEAD,POST,OPTIONS",
    max_age: "86400",
};

impl OriginPolicy {
    /// The policy as header name/value pairs.
    pub fn entries(&self) -> [(HeaderName, HeaderValue); 4] {
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(self.allow_origin),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(self.allow_headers),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(self.allow_methods),
            ),
            (
                header::ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static(self.max_age),
            ),
        ]
    }

    /// Stamp the policy onto a response.
    ///
    /// Each entry replaces any existing value for the same header name.
    /// Nothing else about the response changes.
    pub fn apply<B>(&self, mut response: Response<B>) -> Response<B> {
        let headers = response.headers_mut();
        for (name, value) in self.entries() {
            headers.insert(name, value);
        }
        response
    }

    /// An empty-bodied, default-status response carrying only the policy.
    pub fn empty_response(&self) -> Response<Body> {
        self.apply(Response::new(Body::empty()))
    }
}
