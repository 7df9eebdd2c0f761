//! Project DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::project::{CreateProjectDto, UpdateProjectDto};
use crate::domain::{DomainResult, Project, ProjectStatistics};
use crate::interfaces::http::common::PageInfo;
use crate::shared::validations::{
    check_max_length, check_name, optional_bool, optional_str, required_str, JsonObject,
};

pub const PROJECT_NAME_MIN: u64 = 3;
pub const PROJECT_NAME_MAX: u64 = 50;
pub const DESCRIPTION_MAX: u64 = 350;

fn description(body: &JsonObject) -> DomainResult<Option<&str>> {
    let value = optional_str(body, "description", "description")?;
    if let Some(d) = value {
        check_max_length(d, "description", DESCRIPTION_MAX)?;
    }
    Ok(value)
}

/// Create project request
#[derive(Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl CreateProjectRequest {
    pub fn from_body(body: &JsonObject) -> DomainResult<Self> {
        let name = required_str(body, "name", "name")?;
        check_name(name, PROJECT_NAME_MIN, PROJECT_NAME_MAX)?;
        let description = description(body)?;
        let is_private = optional_bool(body, "isPrivate", "isPrivate")?;

        Ok(Self {
            name: name.to_string(),
            description: description.filter(|d| !d.is_empty()).map(str::to_string),
            is_private: is_private.unwrap_or(false),
        })
    }
}

impl From<CreateProjectRequest> for CreateProjectDto {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            is_private: req.is_private,
        }
    }
}

/// Partial project update; an empty description clears it
#[derive(Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_private: Option<bool>,
}

impl UpdateProjectRequest {
    pub fn parse(body: &JsonObject) -> DomainResult<UpdateProjectDto> {
        let name = optional_str(body, "name", "name")?;
        if let Some(name) = name {
            check_name(name, PROJECT_NAME_MIN, PROJECT_NAME_MAX)?;
        }
        let description = description(body)?;
        let is_private = optional_bool(body, "isPrivate", "isPrivate")?;

        Ok(UpdateProjectDto {
            name: name.map(str::to_string),
            description: description.map(|d| (!d.is_empty()).then(|| d.to_string())),
            is_private,
        })
    }
}

/// Deletion confirmation: the project name, repeated
#[derive(Debug, ToSchema)]
pub struct DeleteProjectRequest {
    pub confirm: String,
}

/// Record counts
#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsView {
    pub memberships: u64,
    pub stories: u64,
}

impl From<ProjectStatistics> for StatisticsView {
    fn from(s: ProjectStatistics) -> Self {
        Self {
            memberships: s.memberships,
            stories: s.stories,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsView>,
}

impl From<Project> for ProjectView {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            is_private: p.is_private,
            created_on: p.created_on,
            updated_on: p.updated_on,
            statistics: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectEnvelope {
    pub project: ProjectView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListEnvelope {
    #[serde(flatten)]
    pub paging: PageInfo,
    pub projects: Vec<ProjectView>,
}
