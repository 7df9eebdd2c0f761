//! JSON object body extractor for Axum
//!
//! `JsonBody` buffers the request body without interpreting it. Handlers
//! call [`JsonBody::object`] once path resolution and authorization have
//! passed, so a malformed body never masks a 404 or a 401. An empty body
//! reads as `{}`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use super::ApiError;
use crate::domain::{DomainError, DomainResult};
use crate::shared::validations::input::JsonObject;

pub struct JsonBody(pub Bytes);

impl JsonBody {
    /// Decode the body as a JSON object.
    pub fn object(&self) -> DomainResult<JsonObject> {
        if self.0.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonObject::new());
        }

        match serde_json::from_slice::<Value>(&self.0) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(DomainError::validation("request body must be a JSON object")),
            Err(_) => Err(DomainError::validation("request body must be valid JSON")),
        }
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(DomainError::validation(rejection.body_text())))?;
        Ok(JsonBody(bytes))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::Router;

    async fn handler(body: JsonBody) -> axum::response::Response {
        match body.object() {
            Ok(map) => map.len().to_string().into_response(),
            Err(e) => ApiError(e).into_response(),
        }
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(body: &'static str) -> (StatusCode, String) {
        use tower::Service;
        let mut svc = app().into_service();
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn object_body_is_accepted() {
        assert_eq!(send(r#"{"name": "x", "confirm": true}"#).await, (StatusCode::OK, "2".into()));
    }

    #[tokio::test]
    async fn empty_body_reads_as_empty_object() {
        assert_eq!(send("").await, (StatusCode::OK, "0".into()));
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let (status, body) = send("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("request body must be valid JSON"));
    }

    #[tokio::test]
    async fn non_object_returns_400() {
        let (status, body) = send("[1, 2]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("request body must be a JSON object"));
    }
}
