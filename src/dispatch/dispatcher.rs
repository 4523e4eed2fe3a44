//! The top-level request dispatcher.
//!
//! # Responsibilities
//! - Answer preflight and bare OPTIONS requests locally
//! - Classify the path and delegate to exactly one collaborator
//! - Serve the help page for unclassified paths
//! - Stamp the origin policy onto every response, including collaborator faults

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::collaborators::{ApiHandler, CollaboratorError, Handler, ProxyHandler, RedirectHandler};
use crate::config::CollaboratorConfig;
use crate::dispatch::fallback;
use crate::http::request::RequestIdExt;
use crate::observability::metrics;
use crate::policy::{preflight, OriginPolicy, ORIGIN_POLICY};
use crate::routing::{classify, RouteDecision};

/// Sequences preflight handling, classification, delegation and policy application.
#[derive(Clone)]
pub struct Dispatcher {
    redirect: Arc<dyn Handler>,
    proxy: Arc<dyn Handler>,
    api: Arc<dyn Handler>,
    policy: &'static OriginPolicy,
}

impl Dispatcher {
    /// Create a dispatcher over the given collaborators.
    pub fn new(redirect: Arc<dyn Handler>, proxy: Arc<dyn Handler>, api: Arc<dyn Handler>) -> Self {
        Self {
            redirect,
            proxy,
            api,
            policy: &ORIGIN_POLICY,
        }
    }

    /// Create a dispatcher wired to the real collaborators.
    pub fn from_config(config: &CollaboratorConfig) -> Result<Self, CollaboratorError> {
        Ok(Self::new(
            Arc::new(RedirectHandler::new()),
            Arc::new(ProxyHandler::new(config)?),
            Arc::new(ApiHandler::new()),
        ))
    }

    /// Handle one inbound request.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start_time = Instant::now();

        if let Some(response) = preflight::maybe_short_circuit(&request, self.policy) {
            metrics::record_preflight();
            return response;
        }

        let decision = classify(request.uri().path());

        tracing::debug!(
            request_id = %request.request_id(),
            method = %request.method(),
            path = %request.uri().path(),
            route = %decision,
            "Dispatching request"
        );

        let response = match decision {
            RouteDecision::Redirect => self.delegate(self.redirect.as_ref(), decision, request).await,
            RouteDecision::Proxy => self.delegate(self.proxy.as_ref(), decision, request).await,
            RouteDecision::Api => self.delegate(self.api.as_ref(), decision, request).await,
            RouteDecision::Fallback => fallback::help_page(),
        };

        metrics::record_request(decision, response.status().as_u16(), start_time);
        self.policy.apply(response)
    }

    async fn delegate(
        &self,
        handler: &dyn Handler,
        decision: RouteDecision,
        request: Request<Body>,
    ) -> Response {
        let request_id = request.request_id().to_string();
        match handler.handle(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    route = %decision,
                    error = %e,
                    "Collaborator failed"
                );
                e.into_response()
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", self.policy)
            .finish_non_exhaustive()
    }
}
