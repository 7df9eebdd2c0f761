//! Project repository interface

use async_trait::async_trait;

use super::{CreateProjectDto, Project, ProjectStatistics, UpdateProjectDto};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert the project and an admin membership for `admin_user_id`
    /// as one unit of work.
    async fn create_with_admin(
        &self,
        dto: CreateProjectDto,
        admin_user_id: &str,
    ) -> DomainResult<Project>;

    async fn get_active(&self, id: &str) -> DomainResult<Option<Project>>;

    async fn list_active(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Project>>;

    async fn update(&self, id: &str, dto: UpdateProjectDto) -> DomainResult<Project>;

    /// Soft delete.
    async fn deactivate(&self, id: &str) -> DomainResult<Project>;

    async fn statistics(&self, id: &str) -> DomainResult<ProjectStatistics>;
}
