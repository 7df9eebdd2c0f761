//! Response envelope and error mapping
//!
//! Success bodies are `{message, ...data}`. Client errors are `{error}`;
//! fatal errors are `{fatalError}` with a flat message and the detail in
//! the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

pub const FATAL_MESSAGE: &str = "an unexpected error has occurred";

/// Standard success envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<Empty> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(message, Empty {})
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Payload for message-only responses
#[derive(Debug, Serialize, ToSchema)]
pub struct Empty {}

/// `{error}` body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// `{fatalError}` body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FatalErrorBody {
    pub fatal_error: String,
}

/// HTTP face of a [`DomainError`]
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
            DomainError::Authentication(_) => StatusCode::FORBIDDEN,
            DomainError::Authorization(_) => StatusCode::UNAUTHORIZED,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Database(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_fatal() {
            error!(error = %self.0, "Request failed");
            let body = FatalErrorBody {
                fatal_error: FATAL_MESSAGE.to_string(),
            };
            return (status, Json(body)).into_response();
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn render(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[derive(Serialize)]
    struct Payload {
        user: &'static str,
    }

    #[tokio::test]
    async fn success_payload_is_flattened() {
        let response = ApiResponse::new("done", Payload { user: "alice" }).into_response();
        let (status, body) = render(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "done", "user": "alice"}));
    }

    #[tokio::test]
    async fn status_codes_follow_error_kind() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (DomainError::Authentication("who".into()), StatusCode::FORBIDDEN),
            (DomainError::Authorization("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::not_found("gone"), StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            let message = err.to_string();
            let (status, body) = render(ApiError(err).into_response()).await;
            assert_eq!(status, expected);
            assert_eq!(body, json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn fatal_errors_hide_details() {
        let err = DomainError::Database("no such table: users".into());
        let (status, body) = render(ApiError(err).into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"fatalError": "an unexpected error has occurred"}));
    }
}
