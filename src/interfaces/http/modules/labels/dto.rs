//! Priority and status DTOs
//!
//! Both kinds share one shape. Payload keys follow the kind: `priority` /
//! `priorities` for priorities, `status` for statuses.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::label::{CreateLabelDto, UpdateLabelDto};
use crate::domain::{DomainResult, Label, LabelKind, ProjectRef};
use crate::interfaces::http::common::{PageInfo, ProjectRefView};
use crate::shared::validations::{
    check_color, check_name, optional_bool, optional_str, required_str, JsonObject,
};

pub const LABEL_NAME_MIN: u64 = 1;
pub const LABEL_NAME_MAX: u64 = 26;

fn color(body: &JsonObject) -> DomainResult<Option<&str>> {
    let value = optional_str(body, "color", "color")?;
    match value {
        Some(c) if !c.is_empty() => check_color(c)?,
        _ => {}
    }
    Ok(value)
}

/// Create priority/status request
#[derive(Debug, ToSchema)]
pub struct CreateLabelRequest {
    pub name: String,
    /// `#RRGGBB`
    pub color: Option<String>,
    #[serde(default)]
    pub transparent: bool,
}

impl CreateLabelRequest {
    pub fn parse(body: &JsonObject) -> DomainResult<CreateLabelDto> {
        let name = required_str(body, "name", "name")?;
        check_name(name, LABEL_NAME_MIN, LABEL_NAME_MAX)?;
        let color = color(body)?;
        let transparent = optional_bool(body, "transparent", "transparent")?;

        Ok(CreateLabelDto {
            name: name.to_string(),
            color: color.filter(|c| !c.is_empty()).map(str::to_string),
            transparent: transparent.unwrap_or(false),
        })
    }
}

/// Partial update; an empty color clears it
#[derive(Debug, ToSchema)]
pub struct UpdateLabelRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub transparent: Option<bool>,
}

impl UpdateLabelRequest {
    pub fn parse(body: &JsonObject) -> DomainResult<UpdateLabelDto> {
        let name = optional_str(body, "name", "name")?;
        if let Some(name) = name {
            check_name(name, LABEL_NAME_MIN, LABEL_NAME_MAX)?;
        }
        let color = color(body)?;
        let transparent = optional_bool(body, "transparent", "transparent")?;

        Ok(UpdateLabelDto {
            name: name.map(str::to_string),
            color: color.map(|c| (!c.is_empty()).then(|| c.to_string())),
            transparent,
        })
    }
}

#[derive(Debug, ToSchema)]
pub struct DeleteLabelRequest {
    pub confirm: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelView {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub transparent: bool,
    pub project: ProjectRefView,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl LabelView {
    pub fn new(label: Label, project: ProjectRef) -> Self {
        Self {
            id: label.id,
            name: label.name,
            color: label.color,
            transparent: label.transparent,
            project: project.into(),
            created_on: label.created_on,
            updated_on: label.updated_on,
        }
    }
}

/// `{priority}` or `{status}`
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LabelEnvelope {
    Priority { priority: LabelView },
    Status { status: LabelView },
}

impl LabelEnvelope {
    pub fn new(kind: LabelKind, label: LabelView) -> Self {
        match kind {
            LabelKind::Priority => Self::Priority { priority: label },
            LabelKind::Status => Self::Status { status: label },
        }
    }
}

/// `{priorities}` or `{status}`
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LabelItems<T> {
    Priorities { priorities: Vec<T> },
    Status { status: Vec<T> },
}

impl<T> LabelItems<T> {
    pub fn new(kind: LabelKind, items: Vec<T>) -> Self {
        match kind {
            LabelKind::Priority => Self::Priorities { priorities: items },
            LabelKind::Status => Self::Status { status: items },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LabelListEnvelope {
    #[serde(flatten)]
    pub paging: PageInfo,
    pub project: ProjectRefView,
    #[serde(flatten)]
    pub items: LabelItems<LabelView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LabelNamesEnvelope {
    #[serde(flatten)]
    pub items: LabelItems<String>,
}
