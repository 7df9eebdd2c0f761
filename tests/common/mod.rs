//! Shared harness for the HTTP integration tests.
//!
//! Each [`TestContext`] owns a fresh in-memory SQLite database and the full
//! router built over it. Requests go through `tower::ServiceExt::oneshot`,
//! so nothing binds a socket.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tower::ServiceExt;

use needle::config::UserRemovalPolicy;
use needle::{build_app, init_database, run_migrations, AppConfig, DatabaseConfig};

pub const PASSWORD: &str = "Password1";
pub const JWT_SECRET: &str = "integration-secret";

/// Response as seen by a client
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    pub fn token(&self) -> String {
        self.headers
            .get("x-needle-token")
            .and_then(|v| v.to_str().ok())
            .expect("response carries x-needle-token")
            .to_string()
    }

    /// Assert a client error and return its message.
    pub fn expect_error(&self, status: StatusCode) -> &str {
        assert_eq!(self.status, status, "unexpected response: {}", self.body);
        self.error()
    }

    pub fn expect_ok(&self) -> &Value {
        assert_eq!(self.status, StatusCode::OK, "unexpected response: {}", self.body);
        &self.body
    }
}

/// A registered and signed-in user
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub token: String,
}

#[derive(Default)]
struct Registry {
    users: HashMap<String, TestUser>,
    projects: Vec<String>,
}

pub struct TestContext {
    app: Router,
    pub config: AppConfig,
    registry: Mutex<Registry>,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.security.jwt_secret = JWT_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.pagination.items_per_page = 10;
    config
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_removal_policy(policy: UserRemovalPolicy) -> Self {
        let mut config = test_config();
        config.policy.user_removal = policy;
        Self::with_config(config).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let db = init_database(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database");
        run_migrations(&db).await.expect("migrations");

        Self {
            app: build_app(db, &config, None),
            config,
            registry: Mutex::new(Registry::default()),
        }
    }

    // ── Raw requests ───────────────────────────────────────────

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-needle-token", token);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("valid request")).await
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> TestResponse {
        self.request(Method::GET, uri, Some(&user.token), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(&user.token), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str, user: &TestUser, body: Value) -> TestResponse {
        self.request(Method::DELETE, uri, Some(&user.token), Some(body))
            .await
    }

    // ── Fixtures ───────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let credentials = STANDARD.encode(format!("{username}:{password}"));
        let request = Request::builder()
            .method(Method::GET)
            .uri("/auth")
            .header("x-needle-basic", format!("Basic {credentials}"))
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    pub async fn register(&self, username: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/users",
            None,
            Some(json!({ "username": username, "password": PASSWORD })),
        )
        .await
    }

    /// Register `username`, sign in and remember the session.
    pub async fn create_user(&self, username: &str) -> TestUser {
        self.register(username).await.expect_ok();
        let session = self.login(username, PASSWORD).await;
        session.expect_ok();

        let user = TestUser {
            username: username.to_lowercase(),
            token: session.token(),
        };
        self.registry
            .lock()
            .unwrap()
            .users
            .insert(user.username.clone(), user.clone());
        user
    }

    /// A user created earlier in this context.
    pub fn user(&self, username: &str) -> TestUser {
        self.registry
            .lock()
            .unwrap()
            .users
            .get(&username.to_lowercase())
            .cloned()
            .expect("user created in this context")
    }

    /// Create a project owned by `owner`; returns its id.
    pub async fn create_project(&self, owner: &TestUser, name: &str, is_private: bool) -> String {
        let response = self
            .post(
                "/projects",
                owner,
                json!({ "name": name, "isPrivate": is_private }),
            )
            .await;
        let id = response.expect_ok()["project"]["id"]
            .as_str()
            .expect("project id")
            .to_string();
        self.registry.lock().unwrap().projects.push(id.clone());
        id
    }

    pub fn projects(&self) -> Vec<String> {
        self.registry.lock().unwrap().projects.clone()
    }

    /// Add `member` to the project with the given role flags; returns the
    /// membership id.
    pub async fn add_member(
        &self,
        admin: &TestUser,
        project_id: &str,
        member: &TestUser,
        roles: Value,
    ) -> String {
        let response = self
            .post(
                &format!("/projects/{project_id}/memberships"),
                admin,
                json!({ "username": member.username, "roles": roles }),
            )
            .await;
        response.expect_ok()["membership"]["id"]
            .as_str()
            .expect("membership id")
            .to_string()
    }

    /// Create a priority or status; `collection` is `priorities` or `status`.
    pub async fn create_label(
        &self,
        user: &TestUser,
        project_id: &str,
        collection: &str,
        name: &str,
    ) -> String {
        let noun = if collection == "priorities" {
            "priority"
        } else {
            "status"
        };
        let response = self
            .post(
                &format!("/projects/{project_id}/{collection}"),
                user,
                json!({ "name": name, "color": "#ff0000" }),
            )
            .await;
        response.expect_ok()[noun]["id"]
            .as_str()
            .expect("label id")
            .to_string()
    }

    /// Create a story and return its JSON view.
    pub async fn create_story(&self, user: &TestUser, project_id: &str, body: Value) -> Value {
        let response = self
            .post(&format!("/projects/{project_id}/stories"), user, body)
            .await;
        response.expect_ok()["story"].clone()
    }
}

/// Role flags for membership requests.
pub fn roles(flag: &str) -> Value {
    json!({ flag: true })
}
