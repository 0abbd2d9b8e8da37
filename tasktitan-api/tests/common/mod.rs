//! Common test utilities for integration tests
//!
//! Each [`TestContext`] owns a fresh SQLite file in a temporary directory and
//! a router built on top of it. Requests go straight through the router with
//! `tower::ServiceExt::oneshot`; no socket is opened.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tasktitan_api::app::{build_router, AppState};
use tasktitan_api::config::Config;
use tasktitan_shared::db::{
    pool::{Database, DatabaseConfig},
    schema::initialize_schema,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: Database,
    pub app: Router,
    _dir: TempDir,
}

impl TestContext {
    /// Creates a context with an empty schema
    pub async fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;

        let mut config = Config::default();
        config.database.path = dir.path().join("api.sqlite");

        let db = Database::connect(DatabaseConfig {
            path: config.database.path.clone(),
            ..Default::default()
        })
        .await?;
        db.transaction(|conn| Box::pin(async move { initialize_schema(conn).await }))
            .await?;

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self { db, app, _dir: dir })
    }

    /// Sends a request with an optional JSON body and returns status and parsed body
    ///
    /// An empty response body comes back as `Value::Null`, a non-JSON one as
    /// `Value::String`.
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    /// Sends a raw body with the JSON content type
    pub async fn request_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }
}
