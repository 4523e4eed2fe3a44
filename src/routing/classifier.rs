//! Route classification.
//!
//! Maps a request path to exactly one [`RouteDecision`]. Pure: no state is
//! kept between calls and nothing is delegated here.

use std::fmt;

use crate::routing::matcher::PathMatcher;

/// Where a request goes after preflight handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDecision {
    /// The redirect collaborator (`/redirect`).
    Redirect,
    /// The forwarding proxy collaborator (`/proxy`).
    Proxy,
    /// The REST API collaborator (`/api/*`).
    Api,
    /// The static help page.
    Fallback,
}

impl RouteDecision {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteDecision::Redirect => "redirect",
            RouteDecision::Proxy => "proxy",
            RouteDecision::Api => "api",
            RouteDecision::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered route table. First match wins.
const ROUTE_TABLE: [(PathMatcher, RouteDecision); 3] = [
    (PathMatcher::Exact("/redirect"), RouteDecision::Redirect),
    (PathMatcher::Exact("/proxy"), RouteDecision::Proxy),
    (PathMatcher::Prefix("/api/"), RouteDecision::Api),
];

/// Classify a path. Every path classifies; `Fallback` is the default.
pub fn classify(path: &str) -> RouteDecision {
    ROUTE_TABLE
        .iter()
        .find(|(matcher, _)| matcher.matches(path))
        .map(|(_, decision)| *decision)
        .unwrap_or(RouteDecision::Fallback)
}
