//! Story handlers

use axum::{
    extract::{Path, Query, State},
    Extension,
};

use super::dto::{DeleteStoryRequest, StoryEnvelope, StoryListEnvelope, StoryRequest};
use crate::application::AuthenticatedUser;
use crate::domain::ProjectRole;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, Empty, ErrorBody, JsonBody, ListQuery, PageInfo,
};
use crate::interfaces::http::state::AppState;
use crate::shared::validations::confirm_true;

#[utoipa::path(
    post,
    path = "/projects/{project_id}/stories",
    tag = "Stories",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id")),
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Story created", body = ApiResponse<StoryEnvelope>),
        (status = 400, description = "Invalid input or unknown reference", body = ErrorBody),
        (status = 401, description = "Developer role required", body = ErrorBody)
    )
)]
pub async fn create_story(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    body: JsonBody,
) -> ApiResult<StoryEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(ProjectRole::Developer)?;

    let input = StoryRequest::parse(&body.object()?, true)?;
    let story = state
        .stories
        .create(&access.project, &caller.user, input)
        .await?;

    Ok(ApiResponse::new(
        "story has been successfully created",
        StoryEnvelope {
            story: story.into(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/stories",
    tag = "Stories",
    security(("x-needle-token" = [])),
    params(("project_id" = String, Path, description = "Project id"), ListQuery),
    responses(
        (status = 200, description = "Stories of the project", body = ApiResponse<StoryListEnvelope>),
        (status = 401, description = "Private project", body = ErrorBody)
    )
)]
pub async fn list_stories(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<StoryListEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require_viewer()?;

    let result = state
        .stories
        .list(&access.project, query.filter(), state.page(&query))
        .await?;

    Ok(ApiResponse::new(
        "story list has been successfully retrieved",
        StoryListEnvelope {
            paging: PageInfo::of(&result),
            project: access.project.reference().into(),
            stories: result.items.into_iter().map(Into::into).collect(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/stories/{story_id}",
    tag = "Stories",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("story_id" = String, Path, description = "Story id")
    ),
    responses(
        (status = 200, description = "Story details", body = ApiResponse<StoryEnvelope>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_story(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, story_id)): Path<(String, String)>,
) -> ApiResult<StoryEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let story = state.stories.find(&access.project, &story_id).await?;
    access.require_viewer()?;

    Ok(ApiResponse::new(
        "story has been successfully retrieved",
        StoryEnvelope {
            story: story.into(),
        },
    ))
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}/stories/{story_id}",
    tag = "Stories",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("story_id" = String, Path, description = "Story id")
    ),
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Story updated", body = ApiResponse<StoryEnvelope>),
        (status = 400, description = "Invalid or empty input", body = ErrorBody),
        (status = 401, description = "Developer role required", body = ErrorBody)
    )
)]
pub async fn update_story(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, story_id)): Path<(String, String)>,
    body: JsonBody,
) -> ApiResult<StoryEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let story = state.stories.find(&access.project, &story_id).await?;
    access.require(ProjectRole::Developer)?;

    let input = StoryRequest::parse(&body.object()?, false)?;
    let story = state
        .stories
        .update(&access.project, &story, input)
        .await?;

    Ok(ApiResponse::new(
        "story has been successfully updated",
        StoryEnvelope {
            story: story.into(),
        },
    ))
}

#[utoipa::path(
    delete,
    path = "/projects/{project_id}/stories/{story_id}",
    tag = "Stories",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("story_id" = String, Path, description = "Story id")
    ),
    request_body = DeleteStoryRequest,
    responses(
        (status = 200, description = "Story removed", body = ApiResponse<Empty>),
        (status = 400, description = "Missing confirmation", body = ErrorBody),
        (status = 401, description = "Developer role required", body = ErrorBody)
    )
)]
pub async fn delete_story(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, story_id)): Path<(String, String)>,
    body: JsonBody,
) -> ApiResult<Empty> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let story = state.stories.find(&access.project, &story_id).await?;
    access.require(ProjectRole::Developer)?;

    confirm_true(&body.object()?)?;
    state.stories.remove(&story).await?;

    Ok(ApiResponse::message("story has been successfully deleted"))
}
