//! Login and token refresh handlers

use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Extension,
};

use super::dto::SessionEnvelope;
use crate::application::identity::{BASIC_HEADER, TOKEN_HEADER};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{ApiError, ApiResponse, ErrorBody};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/auth",
    tag = "Auth",
    params(("x-needle-basic" = String, Header, description = "Basic base64(username:password)")),
    responses(
        (status = 200, description = "Signed in; token in the x-needle-token header", body = ApiResponse<SessionEnvelope>),
        (status = 400, description = "Malformed x-needle-basic header", body = ErrorBody),
        (status = 403, description = "Bad credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let header = headers.get(BASIC_HEADER).and_then(|v| v.to_str().ok());
    let session = state.auth.login(header).await?;

    Ok((
        [(TOKEN_HEADER, session.token)],
        ApiResponse::new(
            "user successfully authenticated",
            SessionEnvelope {
                user: session.user.into(),
            },
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/auth/token",
    tag = "Auth",
    security(("x-needle-token" = [])),
    responses(
        (status = 200, description = "Fresh token in the x-needle-token header", body = ApiResponse<SessionEnvelope>),
        (status = 403, description = "Token rejected", body = ErrorBody)
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.auth.issue_token(&caller.user.id, &caller.api_key)?;

    Ok((
        [(TOKEN_HEADER, token)],
        ApiResponse::new(
            "user successfully authenticated via token",
            SessionEnvelope {
                user: caller.user.into(),
            },
        ),
    ))
}
