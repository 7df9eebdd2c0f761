//! Dashboard DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{MemberProject, RoleFlags};
use crate::interfaces::http::common::PageInfo;
use crate::interfaces::http::modules::stories::StoryView;

/// A project with the caller's roles in it
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProjectView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
    #[schema(value_type = Object)]
    pub roles: RoleFlags,
}

impl From<MemberProject> for DashboardProjectView {
    fn from(m: MemberProject) -> Self {
        Self {
            id: m.project.id,
            name: m.project.name,
            description: m.project.description,
            is_private: m.project.is_private,
            is_active: m.project.is_active,
            created_on: m.project.created_on,
            updated_on: m.project.updated_on,
            roles: RoleFlags::from_role(m.role),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardEnvelope {
    pub projects: Vec<DashboardProjectView>,
    pub stories: Vec<StoryView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardProjectsEnvelope {
    #[serde(flatten)]
    pub paging: PageInfo,
    pub projects: Vec<DashboardProjectView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStoriesEnvelope {
    #[serde(flatten)]
    pub paging: PageInfo,
    pub stories: Vec<StoryView>,
}
