//! Cross-origin policy subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → preflight.rs (preflight trio or bare OPTIONS?)
//!         → yes: empty response stamped with the policy, no delegation
//!         → no:  continue to routing
//!
//! Outgoing Response (collaborator, fallback page, or error)
//!     → origin.rs (stamp the four policy headers, overwriting)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - The policy is a compile-time constant; there is no runtime mutation path
//! - Stamping overwrites same-named headers, so it is idempotent
//! - Preflight header values are never inspected, only their presence

pub mod origin;
pub mod preflight;

pub use origin::{OriginPolicy, ORIGIN_POLICY};
pub use preflight::{maybe_short_circuit, PreflightKind};
