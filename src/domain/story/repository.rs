//! Story repository interface

use async_trait::async_trait;

use super::{CreateStoryDto, StoryDetails, UpdateStoryDto};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait StoryRepository: Send + Sync {
    async fn create(&self, project_id: &str, dto: CreateStoryDto) -> DomainResult<StoryDetails>;

    async fn find(&self, project_id: &str, id: &str) -> DomainResult<Option<StoryDetails>>;

    async fn list(
        &self,
        project_id: &str,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<StoryDetails>>;

    async fn update(&self, id: &str, dto: UpdateStoryDto) -> DomainResult<StoryDetails>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Stories owned by the user inside `project_ids`, oldest first.
    async fn owned_by(&self, user_id: &str, project_ids: &[String])
        -> DomainResult<Vec<StoryDetails>>;

    /// Stories the user created or owns inside `project_ids`.
    async fn involving_user(
        &self,
        user_id: &str,
        project_ids: &[String],
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<StoryDetails>>;
}
