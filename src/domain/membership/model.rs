//! Membership domain entity

use chrono::{DateTime, Utc};

use super::ProjectRole;
use crate::domain::project::{Project, ProjectRef};
use crate::domain::user::UserSummary;

/// A user's seat in a project
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role: Option<ProjectRole>,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl Membership {
    /// Whether the member holds at least `required`.
    pub fn has_role(&self, required: ProjectRole) -> bool {
        self.role.is_some_and(|role| role.satisfies(required))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(ProjectRole::Admin)
    }
}

/// Membership with its user and project resolved
#[derive(Debug, Clone)]
pub struct MembershipDetails {
    pub id: String,
    pub project: ProjectRef,
    pub user: UserSummary,
    pub role: Option<ProjectRole>,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

/// A project seen from one member's side
#[derive(Debug, Clone)]
pub struct MemberProject {
    pub project: Project,
    pub role: Option<ProjectRole>,
}
