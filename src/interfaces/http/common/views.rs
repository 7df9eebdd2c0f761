//! Sub-documents embedded in several responses

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{LabelSummary, ProjectRef, UserSummary};
use crate::shared::PaginatedResult;

/// `{id, name}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectRefView {
    pub id: String,
    pub name: String,
}

impl From<ProjectRef> for ProjectRefView {
    fn from(p: ProjectRef) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

/// `{username, displayName}`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryView {
    pub username: String,
    pub display_name: String,
}

impl From<UserSummary> for UserSummaryView {
    fn from(u: UserSummary) -> Self {
        Self {
            username: u.username,
            display_name: u.display_name,
        }
    }
}

/// `{name, color, transparent}`
#[derive(Debug, Serialize, ToSchema)]
pub struct LabelSummaryView {
    pub name: String,
    pub color: Option<String>,
    pub transparent: bool,
}

impl From<LabelSummary> for LabelSummaryView {
    fn from(l: LabelSummary) -> Self {
        Self {
            name: l.name,
            color: l.color,
            transparent: l.transparent,
        }
    }
}

/// Pagination fields flattened into list payloads
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub total_pages: u64,
    pub items_per_page: u64,
}

impl PageInfo {
    pub fn of<T>(result: &PaginatedResult<T>) -> Self {
        Self {
            page: result.page,
            total_pages: result.total_pages,
            items_per_page: result.items_per_page,
        }
    }
}

