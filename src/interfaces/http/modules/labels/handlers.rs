//! Priority and status handlers
//!
//! One handler set serves `/priorities` and `/status`; the router attaches
//! the [`LabelKind`] as a request extension.

use axum::{
    extract::{Path, Query, State},
    Extension,
};

use super::dto::{
    CreateLabelRequest, DeleteLabelRequest, LabelEnvelope, LabelItems, LabelListEnvelope,
    LabelNamesEnvelope, LabelView, UpdateLabelRequest,
};
use crate::application::AuthenticatedUser;
use crate::domain::{LabelKind, ProjectRole};
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, Empty, ErrorBody, JsonBody, ListQuery, PageInfo,
};
use crate::interfaces::http::state::AppState;
use crate::shared::validations::confirm_true;

#[utoipa::path(
    post,
    path = "/projects/{project_id}/{labels}",
    tag = "Priorities and statuses",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("labels" = String, Path, description = "`priorities` or `status`")
    ),
    request_body = CreateLabelRequest,
    responses(
        (status = 200, description = "Label created", body = ApiResponse<LabelEnvelope>),
        (status = 400, description = "Invalid input or name taken", body = ErrorBody),
        (status = 401, description = "Manager role required", body = ErrorBody)
    )
)]
pub async fn create_label(
    State(state): State<AppState>,
    Extension(kind): Extension<LabelKind>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    body: JsonBody,
) -> ApiResult<LabelEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(ProjectRole::Manager)?;

    let dto = CreateLabelRequest::parse(&body.object()?)?;
    let label = state.labels.create(&access.project, kind, dto).await?;

    Ok(ApiResponse::new(
        format!("{} has been successfully created", kind.noun()),
        LabelEnvelope::new(kind, LabelView::new(label, access.project.reference())),
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/{labels}",
    tag = "Priorities and statuses",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("labels" = String, Path, description = "`priorities` or `status`"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Labels of the project", body = ApiResponse<LabelListEnvelope>),
        (status = 401, description = "Private project", body = ErrorBody)
    )
)]
pub async fn list_labels(
    State(state): State<AppState>,
    Extension(kind): Extension<LabelKind>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<LabelListEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require_viewer()?;

    let result = state
        .labels
        .list(&access.project, kind, query.filter(), state.page(&query))
        .await?;
    let project = access.project.reference();
    let paging = PageInfo::of(&result);
    let labels = result
        .items
        .into_iter()
        .map(|label| LabelView::new(label, project.clone()))
        .collect();

    Ok(ApiResponse::new(
        format!("{} list has been successfully retrieved", kind.collection()),
        LabelListEnvelope {
            paging,
            project: project.into(),
            items: LabelItems::new(kind, labels),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/{labels}/all",
    tag = "Priorities and statuses",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("labels" = String, Path, description = "`priorities` or `status`")
    ),
    responses(
        (status = 200, description = "Every label name", body = ApiResponse<LabelNamesEnvelope>),
        (status = 401, description = "Developer role required", body = ErrorBody)
    )
)]
pub async fn label_names(
    State(state): State<AppState>,
    Extension(kind): Extension<LabelKind>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(project_id): Path<String>,
) -> ApiResult<LabelNamesEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    access.require(ProjectRole::Developer)?;

    let names = state.labels.names(&access.project, kind).await?;

    Ok(ApiResponse::new(
        format!("{} names have been successfully retrieved", kind.noun()),
        LabelNamesEnvelope {
            items: LabelItems::new(kind, names),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/{labels}/{label_id}",
    tag = "Priorities and statuses",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("labels" = String, Path, description = "`priorities` or `status`"),
        ("label_id" = String, Path, description = "Priority or status id")
    ),
    responses(
        (status = 200, description = "Label details", body = ApiResponse<LabelEnvelope>),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_label(
    State(state): State<AppState>,
    Extension(kind): Extension<LabelKind>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, label_id)): Path<(String, String)>,
) -> ApiResult<LabelEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let label = state.labels.find(&access.project, kind, &label_id).await?;
    access.require_viewer()?;

    Ok(ApiResponse::new(
        format!("{} has been successfully retrieved", kind.noun()),
        LabelEnvelope::new(kind, LabelView::new(label, access.project.reference())),
    ))
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}/{labels}/{label_id}",
    tag = "Priorities and statuses",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("labels" = String, Path, description = "`priorities` or `status`"),
        ("label_id" = String, Path, description = "Priority or status id")
    ),
    request_body = UpdateLabelRequest,
    responses(
        (status = 200, description = "Label updated", body = ApiResponse<LabelEnvelope>),
        (status = 400, description = "Invalid or empty input", body = ErrorBody),
        (status = 401, description = "Manager role required", body = ErrorBody)
    )
)]
pub async fn update_label(
    State(state): State<AppState>,
    Extension(kind): Extension<LabelKind>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, label_id)): Path<(String, String)>,
    body: JsonBody,
) -> ApiResult<LabelEnvelope> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let label = state.labels.find(&access.project, kind, &label_id).await?;
    access.require(ProjectRole::Manager)?;

    let dto = UpdateLabelRequest::parse(&body.object()?)?;
    let label = state.labels.update(&label, dto).await?;

    Ok(ApiResponse::new(
        format!("{} has been successfully updated", kind.noun()),
        LabelEnvelope::new(kind, LabelView::new(label, access.project.reference())),
    ))
}

#[utoipa::path(
    delete,
    path = "/projects/{project_id}/{labels}/{label_id}",
    tag = "Priorities and statuses",
    security(("x-needle-token" = [])),
    params(
        ("project_id" = String, Path, description = "Project id"),
        ("labels" = String, Path, description = "`priorities` or `status`"),
        ("label_id" = String, Path, description = "Priority or status id")
    ),
    request_body = DeleteLabelRequest,
    responses(
        (status = 200, description = "Label removed and cleared from stories", body = ApiResponse<Empty>),
        (status = 400, description = "Missing confirmation", body = ErrorBody),
        (status = 401, description = "Manager role required", body = ErrorBody)
    )
)]
pub async fn delete_label(
    State(state): State<AppState>,
    Extension(kind): Extension<LabelKind>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((project_id, label_id)): Path<(String, String)>,
    body: JsonBody,
) -> ApiResult<Empty> {
    let access = state.access.project(&project_id, &caller.user).await?;
    let label = state.labels.find(&access.project, kind, &label_id).await?;
    access.require(ProjectRole::Manager)?;

    confirm_true(&body.object()?)?;
    state.labels.remove(&label).await?;

    Ok(ApiResponse::message(format!(
        "{} has been successfully deleted",
        kind.noun()
    )))
}
