//! Session token middleware
//!
//! Resolves `x-needle-token` to an [`AuthenticatedUser`] and stores it in
//! the request extensions. Handlers extract it with
//! `Extension<AuthenticatedUser>`.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::common::ApiError;
use super::state::AppState;
use crate::application::identity::TOKEN_HEADER;
use crate::application::AuthenticatedUser;

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    match state.auth.authenticate(header.as_deref()).await {
        Ok(caller) => {
            debug!(user = %caller.user.username, "Authenticated request");
            request.extensions_mut().insert::<AuthenticatedUser>(caller);
            next.run(request).await
        }
        Err(e) => ApiError(e).into_response(),
    }
}
