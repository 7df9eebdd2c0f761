//! SeaORM implementation of LabelRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::label::{CreateLabelDto, LabelRepository, UpdateLabelDto};
use crate::domain::{DomainError, DomainResult, Label, LabelKind};
use crate::infrastructure::database::entities::{label, story};
use crate::shared::search::{equals_ignore_case, starts_with_ignore_case};
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmLabelRepository {
    db: DatabaseConnection,
}

impl SeaOrmLabelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn kind_to_entity(kind: LabelKind) -> label::LabelKind {
    match kind {
        LabelKind::Priority => label::LabelKind::Priority,
        LabelKind::Status => label::LabelKind::Status,
    }
}

fn kind_to_domain(kind: label::LabelKind) -> LabelKind {
    match kind {
        label::LabelKind::Priority => LabelKind::Priority,
        label::LabelKind::Status => LabelKind::Status,
    }
}

pub(super) fn label_model_to_domain(model: label::Model) -> Label {
    Label {
        id: model.id,
        project_id: model.project_id,
        kind: kind_to_domain(model.kind),
        name: model.name,
        color: model.color,
        transparent: model.transparent,
        created_on: model.created_on,
        updated_on: model.updated_on,
    }
}

fn scoped(project_id: &str, kind: LabelKind) -> sea_orm::Select<label::Entity> {
    label::Entity::find()
        .filter(label::Column::ProjectId.eq(project_id))
        .filter(label::Column::Kind.eq(kind_to_entity(kind)))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl LabelRepository for SeaOrmLabelRepository {
    async fn create(
        &self,
        project_id: &str,
        kind: LabelKind,
        dto: CreateLabelDto,
    ) -> DomainResult<Label> {
        let model = label::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            project_id: Set(project_id.to_string()),
            kind: Set(kind_to_entity(kind)),
            name: Set(dto.name),
            color: Set(dto.color),
            transparent: Set(dto.transparent),
            created_on: Set(Utc::now()),
            updated_on: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(label_model_to_domain(model))
    }

    async fn find(
        &self,
        project_id: &str,
        kind: LabelKind,
        id: &str,
    ) -> DomainResult<Option<Label>> {
        let model = scoped(project_id, kind)
            .filter(label::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(label_model_to_domain))
    }

    async fn find_by_name(
        &self,
        project_id: &str,
        kind: LabelKind,
        name: &str,
    ) -> DomainResult<Option<Label>> {
        let model = scoped(project_id, kind)
            .filter(equals_ignore_case(label::Column::Name, name))
            .order_by_asc(label::Column::CreatedOn)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(label_model_to_domain))
    }

    async fn name_taken(
        &self,
        project_id: &str,
        kind: LabelKind,
        name: &str,
        exclude_id: Option<&str>,
    ) -> DomainResult<bool> {
        let mut query = scoped(project_id, kind).filter(equals_ignore_case(label::Column::Name, name));
        if let Some(id) = exclude_id {
            query = query.filter(label::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.map_err(db_err)?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        project_id: &str,
        kind: LabelKind,
        filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Label>> {
        let mut query = scoped(project_id, kind);
        if let Some(term) = filter {
            query = query.filter(starts_with_ignore_case(label::Column::Name, term));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let window = page.window(total);

        let models = query
            .order_by_asc(label::Column::CreatedOn)
            .order_by_asc(label::Column::Id)
            .offset(window.offset)
            .limit(window.items_per_page)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(label_model_to_domain).collect(),
            total,
            window,
        ))
    }

    async fn names(&self, project_id: &str, kind: LabelKind) -> DomainResult<Vec<String>> {
        scoped(project_id, kind)
            .select_only()
            .column(label::Column::Name)
            .order_by_asc(label::Column::CreatedOn)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update(&self, id: &str, dto: UpdateLabelDto) -> DomainResult<Label> {
        let model = label::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("requested label not found"))?;

        let mut active = model.into_active_model();
        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(color) = dto.color {
            active.color = Set(color);
        }
        if let Some(transparent) = dto.transparent {
            active.transparent = Set(transparent);
        }
        active.updated_on = Set(Some(Utc::now()));

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(label_model_to_domain(updated))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Detach referencing stories before the row goes
        for column in [story::Column::PriorityId, story::Column::StatusId] {
            story::Entity::update_many()
                .col_expr(column, Expr::value(Option::<String>::None))
                .filter(column.eq(id))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        let result = label::Entity::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("requested label not found"));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
