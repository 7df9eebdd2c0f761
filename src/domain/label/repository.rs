//! Label repository interface

use async_trait::async_trait;

use super::{CreateLabelDto, Label, LabelKind, UpdateLabelDto};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait LabelRepository: Send + Sync {
    async fn create(
        &self,
        project_id: &str,
        kind: LabelKind,
        dto: CreateLabelDto,
    ) -> DomainResult<Label>;

    async fn find(&self, project_id: &str, kind: LabelKind, id: &str)
        -> DomainResult<Option<Label>>;

    /// Case-insensitive name lookup within the project.
    async fn find_by_name(
        &self,
        project_id: &str,
        kind: LabelKind,
        name: &str,
    ) -> DomainResult<Option<Label>>;

    /// Whether another label of this kind already uses `name`
    /// (case-insensitive), ignoring `exclude_id`.
    async fn name_taken(
        &self,
        project_id: &str,
        kind: LabelKind,
        name: &str,
        exclude_id: Option<&str>,
    ) -> DomainResult<bool>;

    async fn list(
        &self,
        project_id: &str,
        kind: LabelKind,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Label>>;

    async fn names(&self, project_id: &str, kind: LabelKind) -> DomainResult<Vec<String>>;

    async fn update(&self, id: &str, dto: UpdateLabelDto) -> DomainResult<Label>;

    /// Hard delete; stories pointing at the label lose the reference.
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
