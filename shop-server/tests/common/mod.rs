//! Shared helpers for HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use shop_server::auth::CredentialHasher;
use shop_server::{AppError, Config, ServerState, build_app};

pub const ADMIN_LOGIN: &str = "bahana";
pub const ADMIN_PASSWORD: &str = "change-me-admin";
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Fast reversible hasher so tests do not pay for Argon2
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}

pub struct TestApp {
    pub dir: TempDir,
    pub state: ServerState,
    pub app: Router,
}

pub fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_work_dir(dir.path(), TEST_SECRET);
    config.ensure_work_dir_structure().unwrap();
    let state = ServerState::with_hasher(config, Arc::new(PlainHasher));
    let app = build_app(&state).with_state(state.clone());
    TestApp { dir, state, app }
}

impl TestApp {
    /// Send one request, return status and parsed JSON body (Null if empty)
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) {
        let (status, body) = self
            .post(
                "/api/register",
                None,
                json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
    }

    pub async fn login(&self, login: &str, password: &str, as_admin: bool) -> String {
        let (status, body) = self
            .post(
                "/api/login",
                None,
                json!({ "login": login, "password": password, "asAdmin": as_admin }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_LOGIN, ADMIN_PASSWORD, true).await
    }

    /// Registered user + token
    pub async fn user_token(&self, name: &str, email: &str) -> String {
        self.register(name, email, "secret-pw").await;
        self.login(email, "secret-pw", false).await
    }
}
