//! Priority and status service
//!
//! Both label kinds share every rule; [`LabelKind`] only changes the nouns
//! in messages.

use std::sync::Arc;

use crate::domain::label::{CreateLabelDto, UpdateLabelDto};
use crate::domain::{DomainError, DomainResult, Label, LabelKind, Project, RepositoryProvider};
use crate::shared::validations::rules::check_id;
use crate::shared::{PageRequest, PaginatedResult};

pub struct LabelService {
    repos: Arc<dyn RepositoryProvider>,
}

fn name_taken() -> DomainError {
    DomainError::validation("name is already taken")
}

impl LabelService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        project: &Project,
        kind: LabelKind,
        dto: CreateLabelDto,
    ) -> DomainResult<Label> {
        if self
            .repos
            .labels()
            .name_taken(&project.id, kind, &dto.name, None)
            .await?
        {
            return Err(name_taken());
        }
        self.repos.labels().create(&project.id, kind, dto).await
    }

    /// Resolve a `{priority_id}` / `{status_id}` path segment.
    pub async fn find(&self, project: &Project, kind: LabelKind, id: &str) -> DomainResult<Label> {
        check_id(id, kind.noun())?;
        self.repos
            .labels()
            .find(&project.id, kind, id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("requested {} not found", kind.noun())))
    }

    pub async fn list(
        &self,
        project: &Project,
        kind: LabelKind,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Label>> {
        self.repos.labels().list(&project.id, kind, filter, page).await
    }

    pub async fn names(&self, project: &Project, kind: LabelKind) -> DomainResult<Vec<String>> {
        self.repos.labels().names(&project.id, kind).await
    }

    /// Renaming a label to its own current name is not a collision.
    pub async fn update(&self, label: &Label, dto: UpdateLabelDto) -> DomainResult<Label> {
        if dto.is_empty() {
            return Err(DomainError::validation("request contains no update input"));
        }
        if let Some(name) = &dto.name {
            if self
                .repos
                .labels()
                .name_taken(&label.project_id, label.kind, name, Some(&label.id))
                .await?
            {
                return Err(name_taken());
            }
        }
        self.repos.labels().update(&label.id, dto).await
    }

    pub async fn remove(&self, label: &Label) -> DomainResult<()> {
        self.repos.labels().delete(&label.id).await
    }
}
