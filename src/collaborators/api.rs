//! REST API collaborator.
//!
//! Owns its internal route table:
//!
//! | Method | Path               | Response                         |
//! |--------|--------------------|----------------------------------|
//! | GET    | `/api/todos`       | `Todos Index!`                   |
//! | GET    | `/api/todos/{id}`  | `Todo #{id}`                     |
//! | POST   | `/api/todos`       | `Creating Todo: <compact JSON>`  |
//! | *      | anything else      | `404 Not Found.`                 |

use std::convert::Infallible;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower::ServiceExt;

use crate::collaborators::{CollaboratorError, Handler};

#[derive(Debug, Clone)]
pub struct ApiHandler {
    router: Router,
}

impl ApiHandler {
    pub fn new() -> Self {
        Self {
            router: Self::build_router(),
        }
    }

    fn build_router() -> Router {
        Router::new()
            .route(
                "/api/todos",
                get(list_todos).post(create_todo).fallback(not_found),
            )
            .route("/api/todos/{id}", get(show_todo).fallback(not_found))
            .fallback(not_found)
    }
}

impl Default for ApiHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for ApiHandler {
    async fn handle(&self, request: Request<Body>) -> Result<Response, CollaboratorError> {
        let response = self.router.clone().oneshot(request).await;
        Ok(response.unwrap_or_else(|never: Infallible| match never {}))
    }
}

async fn list_todos() -> &'static str {
    "Todos Index!"
}

async fn show_todo(Path(id): Path<String>) -> String {
    format!("Todo #{id}")
}

async fn create_todo(Json(content): Json<Value>) -> String {
    format!("Creating Todo: {content}")
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found.")
}
