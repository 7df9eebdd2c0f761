//! Project handlers

use axum::{
    extract::{Path, Query, State},
    Extension,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::dto::{
    CreateProjectRequest, DeleteProjectRequest, ProjectEnvelope, ProjectListEnvelope,
    ProjectView, UpdateProjectRequest,
};
use crate::application::AuthenticatedUser;
use crate::domain::ProjectRole;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, ErrorBody, JsonBody, ListQuery, PageInfo,
};
use crate::interfaces::http::state::AppState;
use crate::shared::validations::confirm_matches;

/// `?includeStatistics=true` adds record counts
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProjectQuery {
    pub include_statistics: Option<String>,
}

impl ProjectQuery {
    pub fn include_statistics(&self) -> bool {
        self.include_statistics
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    security(("x-needle-token" = [])),
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created; the caller is its admin", body = ApiResponse<ProjectEnvelope>),
        (status = 400, description = "Invalid input", body = ErrorBody)
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: JsonBody,
) -> ApiResult<ProjectEnvelope> {
    let request = CreateProjectRequest::from_body(&body.object()?)?;
    let project = state.projects.create(&caller.user, request.into()).await?;

    Ok(ApiResponse::new(
        "project has been successfully created",
        ProjectEnvelope {
            project: project.into(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    security(("x-needle-token" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Active projects", body = ApiResponse<ProjectListEnvelope>)
    )
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ProjectListEnvelope> {
    let result = state
        .projects
        .list(query.filter(), state.page(&query))
        .await?;

    Ok(ApiResponse::new(
        "project list has been successfully retrieved",
        ProjectListEnvelope {
            paging: PageInfo::of(&result),
            projects: result.items.into_iter().map(Into::into).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}",
    tag = "Projects",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id"), ProjectQuery),
    responses(
        (status = 200, description = "Project details", body = ApiResponse<ProjectEnvelope>),
        (status = 401, description = "Private project", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> ApiResult<ProjectEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require_viewer()?;

    let statistics = if query.include_statistics() {
        Some(state.projects.statistics(&access.project).await?)
    } else {
        None
    };

    let mut project: ProjectView = access.project.into();
    project.statistics = statistics.map(Into::into);

    Ok(ApiResponse::new(
        "project has been successfully retrieved",
        ProjectEnvelope { project },
    ))
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}",
    tag = "Projects",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<ProjectEnvelope>),
        (status = 400, description = "Invalid or empty input", body = ErrorBody),
        (status = 401, description = "Manager role required", body = ErrorBody)
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    body: JsonBody,
) -> ApiResult<ProjectEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(ProjectRole::Manager)?;

    let dto = UpdateProjectRequest::parse(&body.object()?)?;
    let project = state.projects.update(&access.project, dto).await?;

    Ok(ApiResponse::new(
        "project has been successfully updated",
        ProjectEnvelope {
            project: project.into(),
        },
    ))
}

#[utoipa::path(
    delete,
    path = "/projects/{project_id}",
    tag = "Projects",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id")),
    request_body = DeleteProjectRequest,
    responses(
        (status = 200, description = "Project deactivated", body = ApiResponse<ProjectEnvelope>),
        (status = 400, description = "Confirmation mismatch", body = ErrorBody),
        (status = 401, description = "Admin role required", body = ErrorBody)
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    body: JsonBody,
) -> ApiResult<ProjectEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(ProjectRole::Admin)?;

    confirm_matches(&body.object()?, "name", &access.project.name)?;
    let project = state.projects.remove(&access.project).await?;

    Ok(ApiResponse::new(
        "project has been successfully deleted",
        ProjectEnvelope {
            project: project.into(),
        },
    ))
}
