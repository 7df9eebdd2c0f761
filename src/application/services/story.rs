//! Story service
//!
//! Clients reference owners by username and labels by name. This service
//! resolves those references inside the story's project before anything
//! is written.

use std::sync::Arc;

use tracing::info;

use crate::domain::story::{CreateStoryDto, UpdateStoryDto};
use crate::domain::{
    DomainError, DomainResult, LabelKind, Project, RepositoryProvider, StoryDetails, User,
};
use crate::shared::validations::rules::check_id;
use crate::shared::{PageRequest, PaginatedResult};

/// Story fields as supplied by a client.
///
/// `Some(None)` clears a nullable field. Owner is a username; priority and
/// status are label names.
#[derive(Debug, Clone, Default)]
pub struct StoryInput {
    pub name: Option<String>,
    pub details: Option<Option<String>>,
    pub points: Option<i32>,
    pub owner: Option<Option<String>>,
    pub priority: Option<Option<String>>,
    pub status: Option<Option<String>>,
}

impl StoryInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.details.is_none()
            && self.points.is_none()
            && self.owner.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }
}

pub struct StoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        project: &Project,
        creator: &User,
        input: StoryInput,
    ) -> DomainResult<StoryDetails> {
        let name = input
            .name
            .ok_or_else(|| DomainError::validation("name is missing from input"))?;

        let dto = CreateStoryDto {
            name,
            details: input.details.flatten(),
            points: input.points,
            creator_id: creator.id.clone(),
            owner_id: self.resolve_owner(project, input.owner).await?.flatten(),
            priority_id: self
                .resolve_label(project, LabelKind::Priority, input.priority)
                .await?
                .flatten(),
            status_id: self
                .resolve_label(project, LabelKind::Status, input.status)
                .await?
                .flatten(),
        };

        let story = self.repos.stories().create(&project.id, dto).await?;
        info!(story_id = %story.id, project_id = %project.id, creator = %creator.username, "Story created");
        Ok(story)
    }

    /// Resolve the `{story_id}` path segment within `project`.
    pub async fn find(&self, project: &Project, story_id: &str) -> DomainResult<StoryDetails> {
        check_id(story_id, "story")?;
        self.repos
            .stories()
            .find(&project.id, story_id)
            .await?
            .ok_or_else(|| DomainError::not_found("requested story not found"))
    }

    pub async fn list(
        &self,
        project: &Project,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<StoryDetails>> {
        self.repos.stories().list(&project.id, filter, page).await
    }

    pub async fn update(
        &self,
        project: &Project,
        story: &StoryDetails,
        input: StoryInput,
    ) -> DomainResult<StoryDetails> {
        if input.is_empty() {
            return Err(DomainError::validation("request contains no update input"));
        }

        let dto = UpdateStoryDto {
            name: input.name,
            details: input.details,
            points: input.points,
            owner_id: self.resolve_owner(project, input.owner).await?,
            priority_id: self
                .resolve_label(project, LabelKind::Priority, input.priority)
                .await?,
            status_id: self
                .resolve_label(project, LabelKind::Status, input.status)
                .await?,
        };

        self.repos.stories().update(&story.id, dto).await
    }

    pub async fn remove(&self, story: &StoryDetails) -> DomainResult<()> {
        self.repos.stories().delete(&story.id).await?;
        info!(story_id = %story.id, "Story removed");
        Ok(())
    }

    /// Owner username to user id. The owner must be an active member.
    async fn resolve_owner(
        &self,
        project: &Project,
        owner: Option<Option<String>>,
    ) -> DomainResult<Option<Option<String>>> {
        let Some(Some(username)) = owner else {
            return Ok(owner);
        };

        let user = self
            .repos
            .users()
            .get_active_by_username(&username)
            .await?
            .ok_or_else(|| DomainError::validation("requested owner does not exist"))?;

        if self
            .repos
            .memberships()
            .find_for_user(&project.id, &user.id)
            .await?
            .is_none()
        {
            return Err(DomainError::validation(
                "requested owner is not a member of this project",
            ));
        }

        Ok(Some(Some(user.id)))
    }

    /// Label name to label id, case-insensitively within the project.
    async fn resolve_label(
        &self,
        project: &Project,
        kind: LabelKind,
        name: Option<Option<String>>,
    ) -> DomainResult<Option<Option<String>>> {
        let Some(Some(name)) = name else {
            return Ok(name);
        };

        let label = self
            .repos
            .labels()
            .find_by_name(&project.id, kind, &name)
            .await?
            .ok_or_else(|| {
                DomainError::validation(format!("requested {} does not exist", kind.noun()))
            })?;

        Ok(Some(Some(label.id)))
    }
}
