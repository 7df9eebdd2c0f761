//! Project-scoped authorization
//!
//! Every `/projects/{id}/...` request first resolves the project and the
//! caller's membership into a [`ProjectAccess`], then asks it for the gate
//! the route needs.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, Membership, Project, ProjectRole, RepositoryProvider, User,
};
use crate::shared::validations::rules::check_id;

/// A caller's standing in one project
#[derive(Debug, Clone)]
pub struct ProjectAccess {
    pub project: Project,
    pub caller: User,
    pub membership: Option<Membership>,
}

impl ProjectAccess {
    /// Pass when the caller's role ranks at least `role`.
    pub fn require(&self, role: ProjectRole) -> DomainResult<()> {
        let Some(membership) = &self.membership else {
            debug!(project_id = %self.project.id, user = %self.caller.username, "Denied: not a member");
            return Err(DomainError::Authorization(
                "you must be a project member to perform this action".into(),
            ));
        };

        if !membership.has_role(role) {
            debug!(
                project_id = %self.project.id,
                user = %self.caller.username,
                required = %role,
                "Denied: insufficient role"
            );
            return Err(DomainError::Authorization(format!(
                "you must have {role} permissions to perform this action"
            )));
        }
        Ok(())
    }

    /// Public projects are readable by anyone signed in; private ones need
    /// a member with some role.
    pub fn require_viewer(&self) -> DomainResult<()> {
        if !self.project.is_private {
            return Ok(());
        }
        self.require(ProjectRole::Viewer)
    }
}

pub struct AccessService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AccessService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Resolve the `{project_id}` path segment for `caller`.
    pub async fn project(&self, project_id: &str, caller: &User) -> DomainResult<ProjectAccess> {
        check_id(project_id, "project")?;

        let project = self
            .repos
            .projects()
            .get_active(project_id)
            .await?
            .ok_or_else(|| DomainError::not_found("requested project not found"))?;

        let membership = self
            .repos
            .memberships()
            .find_for_user(&project.id, &caller.id)
            .await?;

        Ok(ProjectAccess {
            project,
            caller: caller.clone(),
            membership,
        })
    }
}
