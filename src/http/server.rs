//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router sending every path and method to the dispatcher
//! - Wire up middleware (tracing, timeout, request ID, origin policy)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::SetRequestIdLayer,
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::collaborators::CollaboratorError;
use crate::config::DispatchConfig;
use crate::dispatch::Dispatcher;
use crate::http::request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
use crate::policy::ORIGIN_POLICY;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server fronting the dispatcher.
pub struct HttpServer {
    router: Router,
    config: DispatchConfig,
}

impl HttpServer {
    /// Create a server wired to the real collaborators.
    pub fn new(config: DispatchConfig) -> Result<Self, CollaboratorError> {
        let dispatcher = Dispatcher::from_config(&config.collaborators)?;
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Create a server around an already-built dispatcher.
    pub fn with_dispatcher(config: DispatchConfig, dispatcher: Dispatcher) -> Self {
        let state = AppState {
            dispatcher: Arc::new(dispatcher),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The origin policy layers sit outermost so responses generated by
    /// the middleware itself (timeouts) carry the policy too. The request ID
    /// is recorded on the trace span only; responses never carry it.
    #[allow(deprecated)]
    fn build_router(config: &DispatchConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        let mut router = Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request.request_id(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(SetRequestIdLayer::new(request_id, UuidRequestId));

        for (name, value) in ORIGIN_POLICY.entries() {
            router = router.layer(SetResponseHeaderLayer::overriding(name, value));
        }
        router
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }
}

async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.dispatcher.handle(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(DispatchConfig::default()).unwrap()
    }

    fn header_names(response: &Response) -> Vec<String> {
        let mut names: Vec<String> = response.headers().keys().map(|n| n.to_string()).collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_root_through_middleware() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("content-type").unwrap(), "text/html");
        assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(response.headers().get("access-control-max-age").unwrap(), "86400");
        assert!(response.headers().get("x-request-id").is_none());
    }

    #[tokio::test]
    async fn test_preflight_carries_only_policy_headers() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/anything")
                    .header("Origin", "https://x")
                    .header("Access-Control-Request-Method", "GET")
                    .header("Access-Control-Request-Headers", "content-type")
                    .header("x-request-id", "req-from-client")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let names: Vec<String> = header_names(&response)
            .into_iter()
            .filter(|name| name != "content-length")
            .collect();
        assert_eq!(
            names,
            vec![
                "access-control-allow-headers",
                "access-control-allow-methods",
                "access-control-allow-origin",
                "access-control-max-age",
            ]
        );
    }

    #[tokio::test]
    async fn test_options_on_nested_path() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/deeply/nested/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-methods").unwrap(),
            "GET,HEAD,POST,OPTIONS"
        );
        assert!(response.headers().get("x-request-id").is_none());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }
}
