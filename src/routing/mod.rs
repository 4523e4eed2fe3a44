//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request path (query string already stripped)
//!     → classifier.rs (ordered route table, first match wins)
//!     → matcher.rs (exact or prefix comparison)
//!     → Return: RouteDecision (Fallback when nothing matches)
//! ```
//!
//! # Design Decisions
//! - Route table is static, immutable at runtime
//! - No regex (exact and prefix matching only)
//! - Deterministic: same path always yields the same decision
//! - Classification is separate from delegation so it can be tested alone

pub mod classifier;
pub mod matcher;

pub use classifier::{classify, RouteDecision};
pub use matcher::PathMatcher;
