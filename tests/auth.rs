mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use common::{TestContext, TestUser, JWT_SECRET, PASSWORD};

fn sign(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

fn with_token(token: &str) -> TestUser {
    TestUser {
        username: String::new(),
        token: token.to_string(),
    }
}

#[tokio::test]
async fn login_returns_token_header_and_user() {
    let ctx = TestContext::new().await;
    ctx.register("Alice_01").await.expect_ok();

    let response = ctx.login("alice_01", PASSWORD).await;
    let body = response.expect_ok();
    assert_eq!(body["message"], "user successfully authenticated");
    assert_eq!(body["user"]["username"], "alice_01");
    assert_eq!(body["user"]["displayName"], "Alice_01");
    assert!(body["user"].get("password").is_none());
    assert!(!response.token().is_empty());
}

#[tokio::test]
async fn login_header_errors() {
    let ctx = TestContext::new().await;
    ctx.register("alice").await.expect_ok();

    let missing = ctx
        .send(Request::get("/auth").body(Body::empty()).unwrap())
        .await;
    assert_eq!(
        missing.expect_error(StatusCode::BAD_REQUEST),
        "x-needle-basic header is missing from input"
    );

    let bearer = ctx
        .send(
            Request::get("/auth")
                .header("x-needle-basic", "Bearer abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(
        bearer.expect_error(StatusCode::BAD_REQUEST),
        "x-needle-basic must use Basic Auth"
    );

    let wrong = ctx.login("alice", "Password2").await;
    assert_eq!(
        wrong.expect_error(StatusCode::FORBIDDEN),
        "username and password combination is invalid"
    );

    let unknown = ctx.login("nobody", PASSWORD).await;
    assert_eq!(
        unknown.expect_error(StatusCode::FORBIDDEN),
        "username and password combination is invalid"
    );
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let ctx = TestContext::new().await;

    let response = ctx.request(Method::GET, "/users", None, None).await;
    assert_eq!(
        response.expect_error(StatusCode::BAD_REQUEST),
        "x-needle-token header is missing from input"
    );

    let garbage = ctx.get("/users", &with_token("not.a.token")).await;
    assert_eq!(
        garbage.expect_error(StatusCode::FORBIDDEN),
        "x-needle-token is invalid"
    );
}

#[tokio::test]
async fn token_claims_are_checked() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;
    let now = Utc::now().timestamp();

    let expired = sign(json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "api_key": "key",
        "iat": now - 7200,
        "exp": now - 3600,
        "iss": "needle"
    }));
    assert_eq!(
        ctx.get("/users", &with_token(&expired))
            .await
            .expect_error(StatusCode::FORBIDDEN),
        "x-needle-token is expired"
    );

    let no_key = sign(json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "exp": now + 3600,
        "iss": "needle"
    }));
    assert_eq!(
        ctx.get("/users", &with_token(&no_key))
            .await
            .expect_error(StatusCode::FORBIDDEN),
        "x-needle-token is missing required fields"
    );

    let bad_id = sign(json!({
        "sub": "42",
        "api_key": "key",
        "exp": now + 3600,
        "iss": "needle"
    }));
    assert_eq!(
        ctx.get("/users", &with_token(&bad_id))
            .await
            .expect_error(StatusCode::BAD_REQUEST),
        "x-needle-token contains an invalid id"
    );

    let stranger = sign(json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "api_key": "key",
        "exp": now + 3600,
        "iss": "needle"
    }));
    assert_eq!(
        ctx.get("/users", &with_token(&stranger))
            .await
            .expect_error(StatusCode::FORBIDDEN),
        "x-needle-token user could not be authenticated"
    );

    ctx.get("/users", &alice).await.expect_ok();
}

#[tokio::test]
async fn refresh_issues_a_working_token() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;

    let response = ctx.get("/auth/token", &alice).await;
    let body = response.expect_ok();
    assert_eq!(body["message"], "user successfully authenticated via token");
    assert_eq!(body["user"]["username"], "alice");

    let refreshed = with_token(&response.token());
    ctx.get("/users/alice", &refreshed).await.expect_ok();
}

#[tokio::test]
async fn tokens_die_with_their_user() {
    let ctx = TestContext::new().await;
    let alice = ctx.create_user("alice").await;

    ctx.delete("/users/alice", &alice, json!({ "confirm": "alice" }))
        .await
        .expect_ok();

    assert_eq!(
        ctx.get("/users", &alice)
            .await
            .expect_error(StatusCode::FORBIDDEN),
        "x-needle-token user could not be authenticated"
    );
    ctx.login("alice", PASSWORD)
        .await
        .expect_error(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_is_public() {
    let ctx = TestContext::new().await;
    let response = ctx.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
