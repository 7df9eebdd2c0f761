//! Membership service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, MembershipDetails, Project, RepositoryProvider, RolePatch,
};
use crate::shared::validations::rules::check_id;
use crate::shared::{PageRequest, PaginatedResult};

pub struct MembershipService {
    repos: Arc<dyn RepositoryProvider>,
}

impl MembershipService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Add `username` to the project. The role starts at viewer and the
    /// patch is applied on top.
    pub async fn create(
        &self,
        project: &Project,
        username: &str,
        roles: RolePatch,
    ) -> DomainResult<MembershipDetails> {
        let user = self
            .repos
            .users()
            .get_active_by_username(username)
            .await?
            .ok_or_else(|| DomainError::validation("requested user does not exist"))?;

        if self
            .repos
            .memberships()
            .find_for_user(&project.id, &user.id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict("membership already exists".into()));
        }

        let membership = self
            .repos
            .memberships()
            .create(&project.id, &user.id, roles.initial_role())
            .await?;

        info!(project_id = %project.id, user = %user.username, role = ?membership.role, "Membership created");
        Ok(membership)
    }

    /// Resolve the `{membership_id}` path segment within `project`.
    pub async fn find(&self, project: &Project, membership_id: &str) -> DomainResult<MembershipDetails> {
        check_id(membership_id, "membership")?;
        self.repos
            .memberships()
            .find_in_project(&project.id, membership_id)
            .await?
            .ok_or_else(|| DomainError::not_found("requested membership not found"))
    }

    pub async fn list(
        &self,
        project: &Project,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<MembershipDetails>> {
        self.repos.memberships().list(&project.id, page).await
    }

    /// Display names of active users who could still be added.
    pub async fn available(&self, project: &Project, filter: Option<&str>) -> DomainResult<Vec<String>> {
        self.repos.memberships().available_names(&project.id, filter).await
    }

    pub async fn member_names(&self, project: &Project) -> DomainResult<Vec<String>> {
        self.repos.memberships().member_names(&project.id).await
    }

    pub async fn update(
        &self,
        membership: &MembershipDetails,
        roles: RolePatch,
    ) -> DomainResult<MembershipDetails> {
        let role = roles.resolve(membership.role);
        let updated = self.repos.memberships().update_role(&membership.id, role).await?;

        info!(membership_id = %membership.id, from = ?membership.role, to = ?role, "Membership role changed");
        Ok(updated)
    }

    pub async fn remove(&self, membership: &MembershipDetails) -> DomainResult<()> {
        self.repos.memberships().delete(&membership.id).await?;
        info!(membership_id = %membership.id, "Membership removed");
        Ok(())
    }
}
