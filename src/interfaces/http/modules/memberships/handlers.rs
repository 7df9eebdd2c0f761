//! Membership handlers
//!
//! Managers run memberships. Touching the admin flag, or removing an
//! admin, takes an admin.

use axum::{
    extract::{Path, Query, State},
    Extension,
};

use super::dto::{
    parse_roles, requests_admin_flag, CreateMembershipRequest, DeleteMembershipRequest,
    MembershipEnvelope, MembershipListEnvelope, UpdateMembershipRequest, UserNamesEnvelope,
};
use crate::application::AuthenticatedUser;
use crate::domain::{ProjectRole, RolePatch};
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, Empty, ErrorBody, JsonBody, ListQuery, PageInfo,
};
use crate::interfaces::http::state::AppState;
use crate::shared::validations::confirm_true;

/// Manager, or admin when the body sets `roles.isAdmin`.
fn role_gate(body: &JsonBody) -> ProjectRole {
    let touches_admin = body
        .object()
        .map(|object| requests_admin_flag(&object))
        .unwrap_or(false);
    if touches_admin {
        ProjectRole::Admin
    } else {
        ProjectRole::Manager
    }
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}/memberships",
    tag = "Memberships",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id")),
    request_body = CreateMembershipRequest,
    responses(
        (status = 200, description = "Membership created", body = ApiResponse<MembershipEnvelope>),
        (status = 400, description = "Invalid input, unknown user or duplicate", body = ErrorBody),
        (status = 401, description = "Manager role required (admin to set isAdmin)", body = ErrorBody)
    )
)]
pub async fn create_membership(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    body: JsonBody,
) -> ApiResult<MembershipEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(role_gate(&body))?;

    let (username, roles) = CreateMembershipRequest::parse(&body.object()?)?;
    let membership = state
        .memberships
        .create(&access.project, &username, roles)
        .await?;

    Ok(ApiResponse::new(
        "membership has been successfully created",
        MembershipEnvelope {
            membership: membership.into(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/memberships",
    tag = "Memberships",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id"), ListQuery),
    responses(
        (status = 200, description = "Project members", body = ApiResponse<MembershipListEnvelope>),
        (status = 401, description = "Private project", body = ErrorBody)
    )
)]
pub async fn list_memberships(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<MembershipListEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require_viewer()?;

    let result = state
        .memberships
        .list(&access.project, state.page(&query))
        .await?;

    Ok(ApiResponse::new(
        "membership list has been successfully retrieved",
        MembershipListEnvelope {
            paging: PageInfo::of(&result),
            project: access.project.reference().into(),
            memberships: result.items.into_iter().map(Into::into).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/memberships/available",
    tag = "Memberships",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id"), ListQuery),
    responses(
        (status = 200, description = "Display names of active non-members", body = ApiResponse<UserNamesEnvelope>),
        (status = 401, description = "Manager role required", body = ErrorBody)
    )
)]
pub async fn available_users(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<UserNamesEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(ProjectRole::Manager)?;

    let users = state
        .memberships
        .available(&access.project, query.filter())
        .await?;

    Ok(ApiResponse::new(
        "available users have been successfully retrieved",
        UserNamesEnvelope { users },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/memberships/all",
    tag = "Memberships",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Display names of every member", body = ApiResponse<UserNamesEnvelope>),
        (status = 401, description = "Manager role required", body = ErrorBody)
    )
)]
pub async fn member_names(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
) -> ApiResult<UserNamesEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(ProjectRole::Manager)?;

    let users = state.memberships.member_names(&access.project).await?;

    Ok(ApiResponse::new(
        "member names successfully retrieved",
        UserNamesEnvelope { users },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/memberships/{membership_id}",
    tag = "Memberships",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("membership_id" = String, Path, description = "Membership id")
    ),
    responses(
        (status = 200, description = "Membership details", body = ApiResponse<MembershipEnvelope>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_membership(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, membership_id)): Path<(String, String)>,
) -> ApiResult<MembershipEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let membership = state.memberships.find(&access.project, &membership_id).await?;
    access.require_viewer()?;

    Ok(ApiResponse::new(
        "membership has been successfully retrieved",
        MembershipEnvelope {
            membership: membership.into(),
        },
    ))
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}/memberships/{membership_id}",
    tag = "Memberships",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("membership_id" = String, Path, description = "Membership id")
    ),
    request_body = UpdateMembershipRequest,
    responses(
        (status = 200, description = "Roles updated", body = ApiResponse<MembershipEnvelope>),
        (status = 400, description = "Invalid roles", body = ErrorBody),
        (status = 401, description = "Manager role required (admin to set isAdmin)", body = ErrorBody)
    )
)]
pub async fn update_membership(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, membership_id)): Path<(String, String)>,
    body: JsonBody,
) -> ApiResult<MembershipEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let membership = state.memberships.find(&access.project, &membership_id).await?;
    access.require(role_gate(&body))?;

    let roles: RolePatch = parse_roles(&body.object()?, true)?;
    let membership = state.memberships.update(&membership, roles).await?;

    Ok(ApiResponse::new(
        "membership has been successfully updated",
        MembershipEnvelope {
            membership: membership.into(),
        },
    ))
}

#[utoipa::path(
    delete,
    path = "/projects/{project_id}/memberships/{membership_id}",
    tag = "Memberships",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("membership_id" = String, Path, description = "Membership id")
    ),
    request_body = DeleteMembershipRequest,
    responses(
        (status = 200, description = "Membership removed", body = ApiResponse<Empty>),
        (status = 400, description = "Missing confirmation", body = ErrorBody),
        (status = 401, description = "Manager role required (admin to remove an admin)", body = ErrorBody)
    )
)]
pub async fn delete_membership(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, membership_id)): Path<(String, String)>,
    body: JsonBody,
) -> ApiResult<Empty> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let membership = state.memberships.find(&access.project, &membership_id).await?;
    let required = if membership.role == Some(ProjectRole::Admin) {
        ProjectRole::Admin
    } else {
        ProjectRole::Manager
    };
    access.require(required)?;

    confirm_true(&body.object()?)?;
    state.memberships.remove(&membership).await?;

    Ok(ApiResponse::message("membership has been successfully deleted"))
}
