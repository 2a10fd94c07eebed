//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` wrapping the application router and helpers for
//! spinning up a mock chat-completion upstream on an ephemeral port.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use fintrack::config::{AiConfig, Config};
use fintrack::handlers;
use fintrack::services::advisor::AdvisorClient;
use fintrack::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// A test client that makes requests against the application router with
/// the advisor pointed at a mock upstream.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    pub fn new(upstream_url: &str) -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 7070,
            data_api_url: "http://localhost:3000/api".into(),
            ai: AiConfig {
                api_url: upstream_url.to_string(),
                api_key: "test-key".into(),
                model: "deepseek-chat".into(),
            },
        };

        let advisor =
            AdvisorClient::new(config.ai.clone()).expect("Failed to create advisor client");

        Self {
            state: AppState {
                config: Arc::new(config),
                advisor,
            },
        }
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a POST request with a JSON body and return status and parsed body.
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        let parsed = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, parsed)
    }
}

/// Spawn a mock chat-completion endpoint that always answers with `response`.
/// Returns the URL to point the advisor at.
pub async fn spawn_upstream(response: Value) -> String {
    spawn_upstream_inner(response, None).await
}

/// Like `spawn_upstream`, but also records the request body it receives.
pub async fn spawn_capturing_upstream(response: Value, captured: Arc<Mutex<Option<Value>>>) -> String {
    spawn_upstream_inner(response, Some(captured)).await
}

async fn spawn_upstream_inner(
    response: Value,
    captured: Option<Arc<Mutex<Option<Value>>>>,
) -> String {
    let app = Router::new().route(
        "/chat/completions",
        post(move |Json(body): Json<Value>| {
            let response = response.clone();
            let captured = captured.clone();
            async move {
                if let Some(captured) = captured {
                    *captured.lock().unwrap() = Some(body);
                }
                Json(response)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/chat/completions", addr)
}

/// Spawn a mock upstream that always fails with HTTP 500.
pub async fn spawn_failing_upstream() -> String {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream exploded".to_string(),
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/chat/completions", addr)
}
