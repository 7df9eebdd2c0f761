//! Story domain entity

use chrono::{DateTime, Utc};

use crate::domain::label::LabelSummary;
use crate::domain::project::ProjectRef;
use crate::domain::user::UserSummary;

pub const POINTS_MIN: i64 = 0;
pub const POINTS_MAX: i64 = 100;

/// Story with every reference resolved for presentation
#[derive(Debug, Clone)]
pub struct StoryDetails {
    pub id: String,
    pub name: String,
    pub details: Option<String>,
    pub points: Option<i32>,
    pub project: ProjectRef,
    pub creator: UserSummary,
    pub owner: Option<UserSummary>,
    pub priority: Option<LabelSummary>,
    pub status: Option<LabelSummary>,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}
