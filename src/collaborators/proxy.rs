//! Forwarding proxy collaborator.
//!
//! # Responsibilities
//! - Parse `proxyUrl` (required) and `modify` (flag) from the query string
//! - Forward method, headers and body of the original request to `proxyUrl`
//! - Stream the upstream response back, minus hop-by-hop headers
//! - With `modify`, rewrite the `<title>` of HTML responses
//!
//! # Design Decisions
//! - Only absolute http/https targets are fetched
//! - Inbound body is buffered up to a configured limit before forwarding
//! - Unmodified responses are streamed, never buffered
//! - HTML is rewritten only when it fits the same limit and is valid UTF-8;
//!   otherwise it is passed through untouched

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use futures_util::{stream, StreamExt};
use http_body_util::LengthLimitError;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request};
use axum::response::Response;
use url::Url;

use crate::collaborators::{bad_request, has_query_param, query_param, CollaboratorError, Handler};
use crate::config::CollaboratorConfig;
use crate::http::response::is_hop_by_hop;

pub const PROXY_URL_PARAM: &str = "proxyUrl";
pub const MODIFY_PARAM: &str = "modify";

/// Marker header set on responses whose body was rewritten.
pub const X_PROXY_MODIFIED: HeaderName = HeaderName::from_static("x-proxy-modified");

#[derive(Debug, Clone)]
pub struct ProxyHandler {
    client: reqwest::Client,
    modified_title: String,
    max_body_bytes: usize,
}

impl ProxyHandler {
    /// Build the proxy with its own upstream client.
    pub fn new(config: &CollaboratorConfig) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            modified_title: config.modified_title.clone(),
            max_body_bytes: config.max_forward_body_bytes,
        })
    }

    fn forward_headers(inbound: &HeaderMap, modify: bool) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(inbound.len());
        for (name, value) in inbound {
            if name == header::HOST || name == header::CONTENT_LENGTH || is_hop_by_hop(name) {
                continue;
            }
            // The rewrite needs a plain-text body.
            if modify && name == header::ACCEPT_ENCODING {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }
        headers
    }

    fn response_headers(upstream: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(upstream.len());
        for (name, value) in upstream {
            if !is_hop_by_hop(name) {
                headers.append(name.clone(), value.clone());
            }
        }
        headers
    }
}

#[async_trait]
impl Handler for ProxyHandler {
    async fn handle(&self, request: Request<Body>) -> Result<Response, CollaboratorError> {
        let modify = has_query_param(request.uri(), MODIFY_PARAM);
        let Some(target) = query_param(request.uri(), PROXY_URL_PARAM) else {
            return Ok(bad_request("Missing `proxyUrl` query param"));
        };

        let target = match Url::parse(&target) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => {
                tracing::debug!(target_url = %target, "Rejecting proxy target");
                return Ok(bad_request("Invalid `proxyUrl` query param"));
            }
        };

        let (parts, body) = request.into_parts();
        let body = match axum::body::to_bytes(body, self.max_body_bytes).await {
            Ok(body) => body,
            Err(e) if is_length_limit(&e) => {
                return Err(CollaboratorError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            method = %parts.method,
            target_url = %target,
            modify,
            "Forwarding to upstream"
        );

        let mut upstream = self
            .client
            .request(parts.method, target)
            .headers(Self::forward_headers(&parts.headers, modify));
        if !body.is_empty() {
            upstream = upstream.body(body);
        }

        let upstream = upstream.send().await?;
        let status = upstream.status();
        let mut headers = Self::response_headers(upstream.headers());

        let body = if modify && is_html(&headers) {
            self.modified_body(upstream, &mut headers).await?
        } else {
            Body::from_stream(upstream.bytes_stream())
        };

        let mut response = Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

impl ProxyHandler {
    /// Buffer an HTML body and rewrite its title.
    ///
    /// Bodies over `max_body_bytes` are streamed through unmodified from the
    /// point the limit is crossed; bodies that are not UTF-8 are returned as-is.
    async fn modified_body(
        &self,
        mut upstream: reqwest::Response,
        headers: &mut HeaderMap,
    ) -> Result<Body, CollaboratorError> {
        let limit = self.max_body_bytes;
        if upstream.content_length().is_some_and(|len| len > limit as u64) {
            tracing::debug!(limit, "Upstream HTML over rewrite limit, passing through");
            return Ok(Body::from_stream(upstream.bytes_stream()));
        }

        let mut buffered = Vec::new();
        while let Some(chunk) = upstream.chunk().await? {
            buffered.extend_from_slice(&chunk);
            if buffered.len() > limit {
                tracing::debug!(limit, "Upstream HTML over rewrite limit, passing through");
                let prefix = Bytes::from(buffered);
                let head = stream::once(async move { Ok::<_, reqwest::Error>(prefix) });
                return Ok(Body::from_stream(head.chain(upstream.bytes_stream())));
            }
        }

        match String::from_utf8(buffered) {
            Ok(html) => {
                headers.remove(header::CONTENT_LENGTH);
                headers.insert(X_PROXY_MODIFIED, HeaderValue::from_static("true"));
                Ok(Body::from(rewrite_title(&html, &self.modified_title)))
            }
            Err(e) => {
                tracing::debug!("Upstream HTML is not UTF-8, passing through");
                Ok(Body::from(e.into_bytes()))
            }
        }
    }
}

fn is_length_limit(error: &axum::Error) -> bool {
    let mut source = Some(error as &(dyn std::error::Error + 'static));
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"))
        .unwrap_or(false)
}

/// Replace the contents of the first `<title>` element.
///
/// Documents without a complete title element are returned unchanged.
pub fn rewrite_title(html: &str, title: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let Some(open) = find_title_tag(&lower) else {
        return html.to_string();
    };
    let Some(open_end) = lower[open..].find('>').map(|i| open + i + 1) else {
        return html.to_string();
    };
    let Some(close) = lower[open_end..].find("</title>").map(|i| open_end + i) else {
        return html.to_string();
    };

    let mut out = String::with_capacity(html.len() - (close - open_end) + title.len());
    out.push_str(&html[..open_end]);
    out.push_str(title);
    out.push_str(&html[close..]);
    out
}

/// Byte offset of the first `<title>` or `<title ...>` tag, skipping
/// longer names such as `<titlebar>`.
fn find_title_tag(lower: &str) -> Option<usize> {
    const TAG: &str = "<title";
    let mut from = 0;
    while let Some(i) = lower[from..].find(TAG) {
        let start = from + i;
        match lower.as_bytes().get(start + TAG.len()) {
            Some(b'>') => return Some(start),
            Some(b) if b.is_ascii_whitespace() => return Some(start),
            _ => from = start + 1,
        }
    }
    None
}
