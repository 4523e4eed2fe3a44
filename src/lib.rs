//! HTTP request dispatcher with a uniform cross-origin policy.
//!
//! Every request is answered locally (preflight, help page) or delegated to
//! one of three collaborators (redirector, forwarding proxy, REST API), and
//! every response leaves with the same four `Access-Control-*` headers.

// Dispatch core
pub mod dispatch;
pub mod policy;
pub mod routing;

// Downstream capabilities
pub mod collaborators;

// Hosting
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use collaborators::{CollaboratorError, Handler};
pub use config::DispatchConfig;
pub use dispatch::Dispatcher;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use policy::{OriginPolicy, ORIGIN_POLICY};
pub use routing::{classify, RouteDecision};
