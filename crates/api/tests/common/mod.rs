#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{Request, Response};
use axum::Router;
use ayah_api::auth::jwt::JwtConfig;
use ayah_api::auth::{AuthProvider, Session};
use ayah_api::config::ServerConfig;
use ayah_api::router::build_app_router;
use ayah_api::state::AppState;
use ayah_core::graphql::GraphQlRequest;
use ayah_graphql::{GraphQlError, GraphQlExecutor};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_USER_ID: &str = "user-123";
pub const TEST_TOKEN: &str = "mock-jwt-token";
pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        graphql_endpoint: "http://graphql.test/v1/graphql".to_string(),
        upstream_timeout_secs: 10,
        default_author_id: 105,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Auth provider with fixed answers for both lookups.
pub struct FakeAuth {
    pub session: Option<Session>,
    pub token: Option<String>,
}

impl FakeAuth {
    pub fn signed_in() -> Self {
        Self {
            session: Some(Session {
                user_id: TEST_USER_ID.to_string(),
                expires_at: None,
            }),
            token: Some(TEST_TOKEN.to_string()),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            session: None,
            token: None,
        }
    }

    pub fn without_token() -> Self {
        Self {
            token: None,
            ..Self::signed_in()
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn session(&self, _parts: &Parts) -> Option<Session> {
        self.session.clone()
    }

    async fn access_token(&self, _parts: &Parts) -> Option<String> {
        self.token.clone()
    }
}

/// One recorded upstream call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: GraphQlRequest,
    pub bearer_token: String,
}

/// GraphQL executor that records every call and replays queued outcomes.
///
/// Falls back to `{ "users_bookmarks": [] }` when nothing is queued.
#[derive(Default)]
pub struct RecordingGraphQl {
    calls: Mutex<Vec<RecordedCall>>,
    outcomes: Mutex<VecDeque<Result<serde_json::Value, String>>>,
}

impl RecordingGraphQl {
    pub fn respond_with(&self, data: serde_json::Value) {
        self.outcomes.lock().unwrap().push_back(Ok(data));
    }

    pub fn fail_with(&self, message: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphQlExecutor for RecordingGraphQl {
    async fn execute(
        &self,
        request: &GraphQlRequest,
        bearer_token: &str,
    ) -> Result<serde_json::Value, GraphQlError> {
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            bearer_token: bearer_token.to_string(),
        });
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(data)) => Ok(data),
            Some(Err(message)) => Err(GraphQlError::Graphql(vec![message])),
            None => Ok(serde_json::json!({ "users_bookmarks": [] })),
        }
    }
}

// ---------------------------------------------------------------------------
// App + request helpers
// ---------------------------------------------------------------------------

/// Build the full application router (same middleware stack as `main.rs`)
/// around the given collaborators.
pub fn build_test_app(auth: Arc<dyn AuthProvider>, graphql: Arc<RecordingGraphQl>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        auth,
        graphql,
    };
    build_app_router(state, &config)
}

/// Signed-in app plus a handle on its recording executor.
pub fn signed_in_app() -> (Router, Arc<RecordingGraphQl>) {
    let graphql = Arc::new(RecordingGraphQl::default());
    let app = build_test_app(Arc::new(FakeAuth::signed_in()), Arc::clone(&graphql));
    (app, graphql)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw string body without a content type.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
