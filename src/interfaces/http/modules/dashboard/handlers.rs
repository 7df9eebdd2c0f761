//! Dashboard handlers: read-only views of the caller's own work

use axum::{
    extract::{Query, State},
    Extension,
};

use super::dto::{DashboardEnvelope, DashboardProjectsEnvelope, DashboardStoriesEnvelope};
use crate::application::AuthenticatedUser;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ListQuery, PageInfo};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    security(("x-needle-token" = [])),
    responses(
        (status = 200, description = "Member projects and owned stories", body = ApiResponse<DashboardEnvelope>)
    )
)]
pub async fn overview(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> ApiResult<DashboardEnvelope> {
    let dashboard = state.dashboard.overview(&caller.user).await?;

    Ok(ApiResponse::new(
        "user dashboard has been successfully retrieved",
        DashboardEnvelope {
            projects: dashboard.projects.into_iter().map(Into::into).collect(),
            stories: dashboard.stories.into_iter().map(Into::into).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/dashboard/projects",
    tag = "Dashboard",
    security(("x-needle-token" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Member projects, paged", body = ApiResponse<DashboardProjectsEnvelope>)
    )
)]
pub async fn projects(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<DashboardProjectsEnvelope> {
    let result = state
        .dashboard
        .projects(&caller.user, query.filter(), state.page(&query))
        .await?;

    Ok(ApiResponse::new(
        "dashboard projects successfully retrieved",
        DashboardProjectsEnvelope {
            paging: PageInfo::of(&result),
            projects: result.items.into_iter().map(Into::into).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/dashboard/stories",
    tag = "Dashboard",
    security(("x-needle-token" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Stories the caller created or owns, paged", body = ApiResponse<DashboardStoriesEnvelope>)
    )
)]
pub async fn stories(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<DashboardStoriesEnvelope> {
    let result = state
        .dashboard
        .stories(&caller.user, query.filter(), state.page(&query))
        .await?;

    Ok(ApiResponse::new(
        "dashboard stories successfully retrieved",
        DashboardStoriesEnvelope {
            paging: PageInfo::of(&result),
            stories: result.items.into_iter().map(Into::into).collect(),
        },
    ))
}
