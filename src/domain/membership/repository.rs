//! Membership repository interface

use async_trait::async_trait;

use super::{MemberProject, Membership, MembershipDetails, ProjectRole};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert a membership. A second row for the same (project, user)
    /// pair fails with `DomainError::Conflict`.
    async fn create(
        &self,
        project_id: &str,
        user_id: &str,
        role: Option<ProjectRole>,
    ) -> DomainResult<MembershipDetails>;

    async fn find_for_user(&self, project_id: &str, user_id: &str)
        -> DomainResult<Option<Membership>>;

    async fn find_in_project(
        &self,
        project_id: &str,
        membership_id: &str,
    ) -> DomainResult<Option<MembershipDetails>>;

    async fn list(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<MembershipDetails>>;

    /// Display names of the project's active members, oldest membership first.
    async fn member_names(&self, project_id: &str) -> DomainResult<Vec<String>>;

    /// Display names of active users who are not members of the project.
    async fn available_names(
        &self,
        project_id: &str,
        filter: Option<&str>,
    ) -> DomainResult<Vec<String>>;

    async fn update_role(
        &self,
        membership_id: &str,
        role: Option<ProjectRole>,
    ) -> DomainResult<MembershipDetails>;

    async fn delete(&self, membership_id: &str) -> DomainResult<()>;

    /// Every active project the user belongs to, with the user's role.
    async fn member_projects(&self, user_id: &str) -> DomainResult<Vec<MemberProject>>;

    async fn member_projects_page(
        &self,
        user_id: &str,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<MemberProject>>;

    /// Ids of active projects the user belongs to.
    async fn active_project_ids(&self, user_id: &str) -> DomainResult<Vec<String>>;
}
