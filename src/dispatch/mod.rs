//! Dispatch core.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → policy::preflight (short-circuit preflight / bare OPTIONS)
//!     → routing::classify (path → RouteDecision)
//!     → dispatcher.rs (delegate to collaborator, or fallback.rs help page)
//!     → policy::origin (stamp the origin policy)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - The dispatcher validates nothing itself; collaborators own their input
//! - Collaborator faults become error responses that still carry the policy
//! - No timeouts or concurrent sub-requests at this layer

pub mod dispatcher;
pub mod fallback;

pub use dispatcher::Dispatcher;
