//! Path matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefix matching includes whatever trailing slash the prefix carries

/// A condition on the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatcher {
    /// Path must equal the given string.
    Exact(&'static str),
    /// Path must start with the given string.
    Prefix(&'static str),
}

impl PathMatcher {
    /// Returns true if the path satisfies this condition.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatcher::Exact(expected) => path == *expected,
            PathMatcher::Prefix(prefix) => path.starts_with(prefix),
        }
    }
}
