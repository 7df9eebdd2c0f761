//! User handlers
//!
//! Registration is public. Password changes and deletion act on the
//! caller's own account only.

use axum::{
    extract::{Path, Query, State},
    Extension,
};

use super::dto::{
    ChangePasswordRequest, CreateUserRequest, CreatedUserEnvelope, DeleteUserRequest,
    RemovedUserEnvelope, UserEnvelope, UserListEnvelope,
};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, Empty, ErrorBody, JsonBody, ListQuery, PageInfo,
};
use crate::interfaces::http::state::AppState;
use crate::shared::validations::confirm_matches;

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse<CreatedUserEnvelope>),
        (status = 400, description = "Invalid input or username taken", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: JsonBody,
) -> ApiResult<CreatedUserEnvelope> {
    let request = CreateUserRequest::from_body(&body.object()?)?;
    let user = state.users.register(request.into()).await?;

    Ok(ApiResponse::new(
        "user has been successfully created",
        CreatedUserEnvelope { user: user.into() },
    ))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("x-needle-token" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Active users", body = ApiResponse<UserListEnvelope>)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<UserListEnvelope> {
    let result = state.users.list(query.filter(), state.page(&query)).await?;

    Ok(ApiResponse::new(
        "user list has been successfully retrieved",
        UserListEnvelope {
            paging: PageInfo::of(&result),
            users: result.items.into_iter().map(Into::into).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "Users",
    security(("x-needle-token" = [])),
    params(("username" = String, Path, description = "Username, case-insensitive")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserEnvelope>),
        (status = 404, description = "No active user by that name", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<UserEnvelope> {
    let user = state.users.get(&username).await?;

    Ok(ApiResponse::new(
        "user has been successfully retrieved",
        UserEnvelope { user: user.into() },
    ))
}

#[utoipa::path(
    post,
    path = "/users/{username}",
    tag = "Users",
    security(("x-needle-token" = [])),
    params(("username" = String, Path, description = "Username, case-insensitive")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<Empty>),
        (status = 400, description = "Invalid input or wrong current password", body = ErrorBody),
        (status = 401, description = "Not the caller's account", body = ErrorBody)
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    body: JsonBody,
) -> ApiResult<Empty> {
    let target = state.users.get(&username).await?;
    state.users.ensure_self(&caller.user, &target)?;

    let request = ChangePasswordRequest::from_body(&body.object()?)?;
    state
        .users
        .change_password(&target, &request.current_password, &request.password)
        .await?;

    Ok(ApiResponse::message("password has been successfully updated"))
}

#[utoipa::path(
    delete,
    path = "/users/{username}",
    tag = "Users",
    security(("x-needle-token" = [])),
    params(("username" = String, Path, description = "Username, case-insensitive")),
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deactivated", body = ApiResponse<RemovedUserEnvelope>),
        (status = 400, description = "Confirmation mismatch", body = ErrorBody),
        (status = 401, description = "Not the caller's account", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    body: JsonBody,
) -> ApiResult<RemovedUserEnvelope> {
    let target = state.users.get(&username).await?;
    state.users.ensure_self(&caller.user, &target)?;

    confirm_matches(&body.object()?, "username", &target.username)?;
    let removed = state.users.remove(&target).await?;

    Ok(ApiResponse::new(
        "user has been successfully deleted",
        RemovedUserEnvelope {
            user: removed.into(),
        },
    ))
}
