//! Story DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::StoryInput;
use crate::domain::{DomainResult, StoryDetails};
use crate::interfaces::http::common::{
    LabelSummaryView, PageInfo, ProjectRefView, UserSummaryView,
};
use crate::shared::validations::{
    check_max_length, check_name, optional_integer, optional_str, required_str, JsonObject,
};

pub const STORY_NAME_MIN: u64 = 1;
pub const STORY_NAME_MAX: u64 = 100;
pub const DETAILS_MAX: u64 = 2000;
pub const POINTS_MIN: i64 = 0;
pub const POINTS_MAX: i64 = 100;

/// A reference field where `""` clears the current value.
fn clearable(body: &JsonObject, key: &str) -> DomainResult<Option<Option<String>>> {
    Ok(optional_str(body, key, key)?.map(|v| (!v.is_empty()).then(|| v.to_string())))
}

/// Story create/update body; owner is a username, priority and status
/// are label names
#[derive(Debug, ToSchema)]
pub struct StoryRequest {
    pub name: Option<String>,
    pub details: Option<String>,
    pub points: Option<i32>,
    pub owner: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl StoryRequest {
    /// Read and validate every supplied field. `name` is mandatory when
    /// `creating`.
    pub fn parse(body: &JsonObject, creating: bool) -> DomainResult<StoryInput> {
        let name = if creating {
            Some(required_str(body, "name", "name")?)
        } else {
            optional_str(body, "name", "name")?
        };
        if let Some(name) = name {
            check_name(name, STORY_NAME_MIN, STORY_NAME_MAX)?;
        }

        let details = optional_str(body, "details", "details")?;
        if let Some(details) = details {
            check_max_length(details, "details", DETAILS_MAX)?;
        }

        let owner = clearable(body, "owner")?;
        let points = optional_integer(body, "points", "points", POINTS_MIN, POINTS_MAX)?;
        let priority = clearable(body, "priority")?;
        let status = clearable(body, "status")?;

        Ok(StoryInput {
            name: name.map(str::to_string),
            details: details.map(|d| (!d.is_empty()).then(|| d.to_string())),
            points: points.map(|p| p as i32),
            owner,
            priority,
            status,
        })
    }
}

#[derive(Debug, ToSchema)]
pub struct DeleteStoryRequest {
    pub confirm: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoryView {
    pub id: String,
    pub name: String,
    pub details: Option<String>,
    pub points: Option<i32>,
    pub creator: UserSummaryView,
    pub owner: Option<UserSummaryView>,
    pub priority: Option<LabelSummaryView>,
    pub status: Option<LabelSummaryView>,
    pub project: ProjectRefView,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl From<StoryDetails> for StoryView {
    fn from(s: StoryDetails) -> Self {
        Self {
            id: s.id,
            name: s.name,
            details: s.details,
            points: s.points,
            creator: s.creator.into(),
            owner: s.owner.map(Into::into),
            priority: s.priority.map(Into::into),
            status: s.status.map(Into::into),
            project: s.project.into(),
            created_on: s.created_on,
            updated_on: s.updated_on,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoryEnvelope {
    pub story: StoryView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoryListEnvelope {
    #[serde(flatten)]
    pub paging: PageInfo,
    pub project: ProjectRefView,
    pub stories: Vec<StoryView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn error(body: Value, creating: bool) -> String {
        StoryRequest::parse(&object(body), creating)
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn name_is_required_only_on_create() {
        assert_eq!(error(json!({}), true), "name is missing from input");
        let input = StoryRequest::parse(&object(json!({})), false).unwrap();
        assert!(input.is_empty());
    }

    #[test]
    fn field_rules() {
        assert_eq!(
            error(json!({"name": "x".repeat(101)}), true),
            "name must be 1 - 100 characters in length"
        );
        assert_eq!(
            error(json!({"name": "x", "details": "d".repeat(2001)}), true),
            "details must be 2000 characters or less"
        );
        assert_eq!(error(json!({"owner": 3}), false), "owner must be a string");
        assert_eq!(error(json!({"points": 2.5}), false), "points must be an integer");
        assert_eq!(error(json!({"priority": true}), false), "priority must be a string");
        assert_eq!(error(json!({"status": []}), false), "status must be a string");
    }

    #[test]
    fn empty_strings_clear_references() {
        let input = StoryRequest::parse(
            &object(json!({"owner": "", "priority": "", "status": "Done", "details": ""})),
            false,
        )
        .unwrap();
        assert_eq!(input.owner, Some(None));
        assert_eq!(input.priority, Some(None));
        assert_eq!(input.status, Some(Some("Done".to_string())));
        assert_eq!(input.details, Some(None));
    }
}
