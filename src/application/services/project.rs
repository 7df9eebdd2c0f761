//! Project service

use std::sync::Arc;

use crate::domain::project::{CreateProjectDto, UpdateProjectDto};
use crate::domain::{
    DomainError, DomainResult, Project, ProjectStatistics, RepositoryProvider, User,
};
use crate::shared::{PageRequest, PaginatedResult};

pub struct ProjectService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProjectService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// The creator becomes the project's admin.
    pub async fn create(&self, creator: &User, dto: CreateProjectDto) -> DomainResult<Project> {
        self.repos.projects().create_with_admin(dto, &creator.id).await
    }

    pub async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Project>> {
        self.repos.projects().list_active(filter, page).await
    }

    pub async fn statistics(&self, project: &Project) -> DomainResult<ProjectStatistics> {
        self.repos.projects().statistics(&project.id).await
    }

    pub async fn update(&self, project: &Project, dto: UpdateProjectDto) -> DomainResult<Project> {
        if dto.is_empty() {
            return Err(DomainError::validation("request contains no update input"));
        }
        self.repos.projects().update(&project.id, dto).await
    }

    pub async fn remove(&self, project: &Project) -> DomainResult<Project> {
        self.repos.projects().deactivate(&project.id).await
    }
}
