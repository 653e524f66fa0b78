//! Shared test harness for E2E integration tests.
//!
//! Drives the full HTTP surface through `tower::oneshot` against in-memory
//! state, exercising real code paths across crate boundaries.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mh_protocol::users::Role;
use mh_support_api::auth::DEFAULT_TOKEN_TTL;
use mh_support_api::classify::RemoteClassifier;
use mh_support_api::routes::build_router;
use mh_support_api::state::AppState;

/// End-to-end harness: app state plus a router for oneshot requests.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Rules-only harness, no remote tier.
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    /// Harness with a remote classification tier attached.
    pub fn with_remote(remote: Arc<dyn RemoteClassifier>) -> Self {
        Self {
            state: AppState::new().with_remote(remote),
        }
    }

    fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Issue a token the way operator tooling would.
    pub fn token_for(&self, username: &str, role: Role) -> String {
        self.state
            .auth
            .issue(username, role, DEFAULT_TOKEN_TTL)
            .unwrap()
    }

    /// POST a JSON body. Returns (status, response JSON).
    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let mut request = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = self
            .router()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        Self::split(response).await
    }

    /// GET a resource. Returns (status, response JSON).
    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::get(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = self
            .router()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        Self::split(response).await
    }

    /// PUT with an empty body. Returns (status, response JSON or null).
    pub async fn put(&self, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router()
            .oneshot(
                Request::put(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        Self::split(response).await
    }

    async fn split(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
