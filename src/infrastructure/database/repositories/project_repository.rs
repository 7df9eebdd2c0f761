//! SeaORM implementation of ProjectRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::db_err;
use crate::domain::project::{
    CreateProjectDto, ProjectRepository, ProjectStatistics, UpdateProjectDto,
};
use crate::domain::{DomainError, DomainResult, Project};
use crate::infrastructure::database::entities::{membership, project, story, user};
use crate::shared::search::starts_with_ignore_case;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmProjectRepository {
    db: DatabaseConnection,
}

impl SeaOrmProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active_model(&self, id: &str) -> DomainResult<project::Model> {
        project::Entity::find_by_id(id.to_string())
            .filter(project::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("requested project not found"))
    }
}

pub(super) fn project_model_to_domain(model: project::Model) -> Project {
    Project {
        id: model.id,
        name: model.name,
        description: model.description,
        is_private: model.is_private,
        is_active: model.is_active,
        created_on: model.created_on,
        updated_on: model.updated_on,
        deleted_on: model.deleted_on,
    }
}

#[async_trait]
impl ProjectRepository for SeaOrmProjectRepository {
    async fn create_with_admin(
        &self,
        dto: CreateProjectDto,
        admin_user_id: &str,
    ) -> DomainResult<Project> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        let created = project::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            description: Set(dto.description),
            is_private: Set(dto.is_private),
            is_active: Set(true),
            created_on: Set(now),
            updated_on: Set(None),
            deleted_on: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        membership::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            project_id: Set(created.id.clone()),
            user_id: Set(admin_user_id.to_string()),
            role: Set(Some(membership::MembershipRole::Admin)),
            created_on: Set(now),
            updated_on: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        info!(project_id = %created.id, admin = %admin_user_id, "Project created");
        Ok(project_model_to_domain(created))
    }

    async fn get_active(&self, id: &str) -> DomainResult<Option<Project>> {
        let model = project::Entity::find_by_id(id.to_string())
            .filter(project::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(project_model_to_domain))
    }

    async fn list_active(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Project>> {
        let mut query = project::Entity::find().filter(project::Column::IsActive.eq(true));
        if let Some(term) = filter {
            query = query.filter(starts_with_ignore_case(project::Column::Name, term));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let window = page.window(total);

        let models = query
            .order_by_asc(project::Column::CreatedOn)
            .order_by_asc(project::Column::Id)
            .offset(window.offset)
            .limit(window.items_per_page)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(project_model_to_domain).collect(),
            total,
            window,
        ))
    }

    async fn update(&self, id: &str, dto: UpdateProjectDto) -> DomainResult<Project> {
        let model = self.find_active_model(id).await?;
        let mut active = model.into_active_model();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(description) = dto.description {
            active.description = Set(description);
        }
        if let Some(is_private) = dto.is_private {
            active.is_private = Set(is_private);
        }
        active.updated_on = Set(Some(Utc::now()));

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(project_model_to_domain(updated))
    }

    async fn deactivate(&self, id: &str) -> DomainResult<Project> {
        let model = self.find_active_model(id).await?;

        let now = Utc::now();
        let mut active = model.into_active_model();
        active.is_active = Set(false);
        active.updated_on = Set(Some(now));
        active.deleted_on = Set(Some(now));

        let updated = active.update(&self.db).await.map_err(db_err)?;
        info!(project_id = %id, "Project deactivated");
        Ok(project_model_to_domain(updated))
    }

    async fn statistics(&self, id: &str) -> DomainResult<ProjectStatistics> {
        let memberships = membership::Entity::find()
            .filter(membership::Column::ProjectId.eq(id))
            .inner_join(user::Entity)
            .filter(user::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let stories = story::Entity::find()
            .filter(story::Column::ProjectId.eq(id))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(ProjectStatistics {
            memberships,
            stories,
        })
    }
}
